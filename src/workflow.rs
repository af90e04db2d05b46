//! The search → select → analyse → blog pipeline.
//!
//! Each step is a free function over its inputs so it can be run and tested
//! on its own; [`Workflow`] strings them together for one topic.

use paper_search::{BuiltinSource, Paper, PaperSource, SearchConfig};
use tracing::Instrument;

use crate::config::ScribeConfig;
use crate::error::{Result, ScribeError};
use crate::llm::{OpenAiClient, TextGenerator, prompts};

/// Everything produced by one run. Lives for that run only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowState {
    /// The topic as entered.
    pub topic: String,
    /// Ranked papers from the search step (empty when started from a paper).
    pub papers: Vec<Paper>,
    /// Index of the selected paper within `papers` after clamping.
    pub paper_index: usize,
    /// The paper that was analysed.
    pub selected_paper: Option<Paper>,
    /// Analysis text from the language model.
    pub analysis: String,
    /// Markdown blog post from the language model.
    pub blog_post: String,
}

impl WorkflowState {
    /// Fresh state for `topic`.
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            ..Default::default()
        }
    }
}

/// Search `source` for ranked papers on `topic`.
///
/// # Errors
///
/// Returns [`ScribeError::Search`] when the topic or config is invalid or the
/// source fails, and [`ScribeError::NoPapers`] when nothing was found.
pub async fn search_step<S: PaperSource>(
    source: &S,
    topic: &str,
    config: &SearchConfig,
) -> Result<Vec<Paper>> {
    let papers = paper_search::search_with(source, topic, config).await?;
    if papers.is_empty() {
        tracing::warn!(source = %source.kind(), "search returned no papers");
        return Err(ScribeError::NoPapers(topic.trim().to_owned()));
    }
    tracing::info!(count = papers.len(), source = %source.kind(), "papers found");
    Ok(papers)
}

/// Pick the paper at `index`, falling back to the first paper when the index
/// is out of range.
///
/// Returns the index actually used alongside the paper.
///
/// # Errors
///
/// Returns [`ScribeError::NoPapers`] when `papers` is empty.
pub fn select_step(papers: &[Paper], index: usize) -> Result<(usize, Paper)> {
    if papers.is_empty() {
        return Err(ScribeError::NoPapers(String::new()));
    }
    let used = if index < papers.len() {
        index
    } else {
        tracing::warn!(
            requested = index,
            available = papers.len(),
            "paper index out of range, using the first paper"
        );
        0
    };
    let paper = papers[used].clone();
    tracing::info!(index = used, title = %paper.title, "paper selected");
    Ok((used, paper))
}

/// Ask the language model for an analysis of `paper`.
///
/// # Errors
///
/// Returns [`ScribeError::Llm`] when generation fails.
pub async fn analyze_step(llm: &dyn TextGenerator, paper: &Paper) -> Result<String> {
    let prompt = prompts::analysis_prompt(paper);
    let analysis = llm.generate(&prompt).await?;
    tracing::info!(chars = analysis.len(), generator = llm.name(), "analysis generated");
    Ok(analysis)
}

/// Ask the language model for a Markdown blog post built from `analysis`.
///
/// # Errors
///
/// Returns [`ScribeError::NoAnalysis`] for a blank analysis and
/// [`ScribeError::Llm`] when generation fails.
pub async fn blog_step(llm: &dyn TextGenerator, paper: &Paper, analysis: &str) -> Result<String> {
    if analysis.trim().is_empty() {
        return Err(ScribeError::NoAnalysis(paper.title.clone()));
    }
    let prompt = prompts::blog_prompt(paper, analysis);
    let post = llm.generate(&prompt).await?;
    tracing::info!(chars = post.len(), generator = llm.name(), "blog post generated");
    Ok(post)
}

/// Runs the four steps against an injected paper source and text generator.
pub struct Workflow<S> {
    source: S,
    llm: Box<dyn TextGenerator>,
    search: SearchConfig,
}

impl<S> std::fmt::Debug for Workflow<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workflow")
            .field("generator", &self.llm.name())
            .field("search", &self.search)
            .finish()
    }
}

impl Workflow<BuiltinSource> {
    /// Build a workflow for the configured source and OpenAI-compatible API.
    ///
    /// # Errors
    ///
    /// Returns [`ScribeError::Config`] for an invalid config and
    /// [`ScribeError::Llm`] when the API key cannot be resolved.
    pub fn from_config(config: &ScribeConfig) -> Result<Self> {
        config.validate()?;
        let llm = OpenAiClient::from_config(&config.llm)?;
        Ok(Self::new(
            BuiltinSource(config.search.source),
            Box::new(llm),
            config.search.clone(),
        ))
    }
}

impl<S: PaperSource> Workflow<S> {
    /// Create a workflow from its collaborators.
    pub fn new(source: S, llm: Box<dyn TextGenerator>, search: SearchConfig) -> Self {
        Self {
            source,
            llm,
            search,
        }
    }

    /// Search settings used by the search step.
    pub fn search_config(&self) -> &SearchConfig {
        &self.search
    }

    /// Run search, select, analyse and blog for `topic`.
    ///
    /// # Errors
    ///
    /// Stops at the first failing step and returns its error.
    pub async fn run(&self, topic: &str, paper_index: usize) -> Result<WorkflowState> {
        let span = tracing::info_span!("workflow", source = %self.source.kind());
        async {
            let mut state = WorkflowState::new(topic);

            state.papers = search_step(&self.source, topic, &self.search)
                .instrument(tracing::info_span!("search"))
                .await?;

            let (index, paper) = select_step(&state.papers, paper_index)?;
            state.paper_index = index;

            self.finish(state, paper).await
        }
        .instrument(span)
        .await
    }

    /// Skip search and selection: analyse `paper` and write the blog post.
    ///
    /// # Errors
    ///
    /// Returns the analyse or blog step's error.
    pub async fn run_from_paper(&self, topic: &str, paper: Paper) -> Result<WorkflowState> {
        tracing::info!(title = %paper.title, "starting from selected paper");
        let state = WorkflowState::new(topic);
        self.finish(state, paper)
            .instrument(tracing::info_span!("workflow", source = "preselected"))
            .await
    }

    async fn finish(&self, mut state: WorkflowState, paper: Paper) -> Result<WorkflowState> {
        state.analysis = analyze_step(self.llm.as_ref(), &paper)
            .instrument(tracing::info_span!("analyze"))
            .await?;
        state.blog_post = blog_step(self.llm.as_ref(), &paper, &state.analysis)
            .instrument(tracing::info_span!("blog"))
            .await?;
        state.selected_paper = Some(paper);
        Ok(state)
    }
}
