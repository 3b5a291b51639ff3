/// Represents the provider (backend) used for large language model (LLM) inference.
///
/// This enum distinguishes between OpenAI's hosted API and a local Ollama
/// runtime. The earnings-call pipeline uses OpenAI by default; Ollama is kept
/// for fully local deployments.
///
/// Adding more providers in the future (e.g., Anthropic Claude, Mistral API)
/// can be done by extending this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// OpenAI's hosted chat/embeddings API.
    OpenAI,
    /// Local Ollama runtime for on-device inference.
    Ollama,
}
