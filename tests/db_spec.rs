use effort_estimator::db::Database;
use effort_estimator::estimate::ProjectStore;
use effort_estimator::models::*;
use speculate2::speculate;
use uuid::Uuid;

fn record(name: &str) -> ProjectRecord {
    ProjectRecord::new(ProjectMetadata {
        name: name.to_string(),
        owner: "Web team".to_string(),
        description: "Online shop".to_string(),
        industry: "Retail".to_string(),
    })
}

fn entry(module: &str, name: &str, size: Size, hours: f64) -> Feature {
    Feature {
        id: Uuid::new_v4(),
        module: module.to_string(),
        name: name.to_string(),
        quantity_multiplier: 1.0,
        size,
        hours,
    }
}

speculate! {
    before {
        let db = Database::open_memory().expect("Failed to create in-memory database");
        db.migrate().expect("Failed to run migrations");
    }

    describe "records" {
        describe "create_record" {
            it "stores a project with its features" {
                let mut project = record("Storefront");
                project.features = vec![
                    entry("Code Setup", "Repository", Size::S, 20.0),
                    entry("Checkout", "Cart", Size::M, 60.0),
                ];
                let id = db.create_record(&project).expect("Failed to create");

                let found = db.get_record(id).expect("Query failed").expect("Record missing");
                assert_eq!(found, project);
            }
        }

        describe "get_record" {
            it "returns None for a non-existent project" {
                let result = db.get_record(Uuid::new_v4()).expect("Query failed");
                assert!(result.is_none());
            }

            it "preserves feature order" {
                let mut project = record("Storefront");
                project.features = ["Zeta", "Alpha", "Mid"]
                    .iter()
                    .map(|name| entry("Catalog", name, Size::S, 20.0))
                    .collect();
                let id = db.create_record(&project).unwrap();

                let names: Vec<String> = db
                    .get_record(id)
                    .unwrap()
                    .unwrap()
                    .features
                    .into_iter()
                    .map(|f| f.name)
                    .collect();
                assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
            }

            it "round-trips cost model, inclusions and notes" {
                let mut project = record("Storefront");
                project.cost_model.set_base_hours(Size::M, 32.0).unwrap();
                project.inclusions.include_backend = true;
                project.comments.qa = "Manual regression only".to_string();
                project.notes.code_coverage = Some(80.0);
                project.notes.tech_stack = "React".to_string();
                let id = db.create_record(&project).unwrap();

                let found = db.get_record(id).unwrap().unwrap();
                assert_eq!(found.cost_model.base_hours(Size::M), 32.0);
                assert!(found.inclusions.include_backend);
                assert_eq!(found.comments.qa, "Manual regression only");
                assert_eq!(found.notes.code_coverage, Some(80.0));
                assert_eq!(found.notes.tech_stack, "React");
            }
        }

        describe "update_record" {
            it "replaces features and metadata" {
                let mut project = record("Storefront");
                project.features = vec![entry("Catalog", "Search", Size::L, 120.0)];
                let id = db.create_record(&project).unwrap();

                project.metadata.name = "Storefront v2".to_string();
                project.features = vec![entry("Checkout", "Payments", Size::XL, 250.0)];
                assert!(db.update_record(id, &project).unwrap());

                let found = db.get_record(id).unwrap().unwrap();
                assert_eq!(found.metadata.name, "Storefront v2");
                assert_eq!(found.features.len(), 1);
                assert_eq!(found.features[0].name, "Payments");
            }

            it "returns false for a non-existent project" {
                let updated = db.update_record(Uuid::new_v4(), &record("Ghost")).unwrap();
                assert!(!updated);
            }
        }

        describe "delete_record" {
            it "deletes the project and cascades to features" {
                let mut project = record("Storefront");
                project.features = vec![entry("Catalog", "Search", Size::L, 120.0)];
                let id = db.create_record(&project).unwrap();

                assert!(db.delete_record(id).unwrap());
                assert!(db.get_record(id).unwrap().is_none());
                assert!(!db.delete_record(id).unwrap());
            }
        }

        describe "list_records" {
            it "returns all projects ordered by name" {
                db.create_record(&record("Zebra")).unwrap();
                db.create_record(&record("Apple")).unwrap();

                let names: Vec<String> = db
                    .list_records()
                    .unwrap()
                    .into_iter()
                    .map(|(_, r)| r.metadata.name)
                    .collect();
                assert_eq!(names, vec!["Apple", "Zebra"]);
            }
        }
    }

    describe "project_summaries" {
        it "returns empty list when no projects exist" {
            assert!(db.get_project_summaries().unwrap().is_empty());
        }

        it "reports feature count and total effort" {
            let mut project = record("Storefront");
            project.features = vec![
                entry("Code Setup", "Repository", Size::S, 20.0),
                entry("Buffer", "Contingency", Size::XS, 5.0),
            ];
            let id = db.create_record(&project).unwrap();

            let summaries = db.get_project_summaries().unwrap();
            assert_eq!(summaries.len(), 1);
            assert_eq!(summaries[0].id, id);
            assert_eq!(summaries[0].industry, "Retail");
            assert_eq!(summaries[0].feature_count, 2);
            assert_eq!(summaries[0].total_effort_hours, 25.0);
        }
    }

    describe "file storage" {
        it "persists records across connections" {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("data").join("estimator.db");

            let id = {
                let db = Database::open(path.clone()).unwrap();
                db.migrate().unwrap();
                db.create_record(&record("Storefront")).unwrap()
            };

            let reopened = Database::open(path).unwrap();
            reopened.migrate().unwrap();
            let found = reopened.get_record(id).unwrap().unwrap();
            assert_eq!(found.metadata.name, "Storefront");
        }

        it "refuses to load a record with a corrupt notes column" {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("estimator.db");
            let db = Database::open(path.clone()).unwrap();
            db.migrate().unwrap();
            let id = db.create_record(&record("Storefront")).unwrap();

            let raw = rusqlite::Connection::open(&path).unwrap();
            raw.execute(
                "UPDATE projects SET notes = 'not json' WHERE id = ?",
                [id.to_string()],
            )
            .unwrap();

            let err = db.get_record(id).unwrap_err();
            assert!(err.to_string().contains("Invalid technical notes"));
        }
    }
}
