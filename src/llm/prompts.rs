//! Prompt templates for the analysis and blog steps.

use paper_search::Paper;

/// Shown in place of a missing paper URL.
pub const NO_URL: &str = "No URL available";

/// Build the prompt asking for a concise analysis of `paper`.
pub fn analysis_prompt(paper: &Paper) -> String {
    format!(
        "Analyze the following research paper:\n\
         \n\
         Title: {title}\n\
         Authors: {authors}\n\
         Summary: {summary}\n\
         \n\
         Provide a concise analysis covering:\n\
         1. Main research question\n\
         2. Key methodology\n\
         3. Primary findings\n\
         4. Implications for the field\n\
         \n\
         Analysis:",
        title = paper.title,
        authors = paper.authors_joined(),
        summary = paper.summary,
    )
}

/// Build the prompt asking for a Markdown blog post from `analysis`.
pub fn blog_prompt(paper: &Paper, analysis: &str) -> String {
    let url = if paper.url.trim().is_empty() {
        NO_URL
    } else {
        paper.url.as_str()
    };
    format!(
        "Write a technical blog post based on this paper analysis:\n\
         \n\
         Paper: {title}\n\
         Authors: {authors}\n\
         URL: {url}\n\
         Analysis: {analysis}\n\
         \n\
         Create a 500-word technical blog post with:\n\
         1. A catchy title\n\
         2. Brief introduction to the problem\n\
         3. Summary of the approach\n\
         4. Key findings and their significance\n\
         5. Conclusion with future implications\n\
         6. Include a \"References\" section at the end with the paper URL\n\
         \n\
         Format the blog as Markdown with proper headers, links, and styling.\n\
         \n\
         Blog Post:",
        title = paper.title,
        authors = paper.authors_joined(),
    )
}
