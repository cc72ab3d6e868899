/// Build the estimation prompt sent to remote providers.
pub fn build_prompt(description: &str) -> String {
    format!(
        "You are an experienced project manager estimating frontend development effort.\n\n\
         Suggest a T-shirt size (XS, S, M, L, XL) for the feature below and explain your reasoning.\n\n\
         Feature Description: {}\n\n\
         Weigh complexity, scope and delivery risk when choosing the size.\n",
        description.trim()
    )
}
