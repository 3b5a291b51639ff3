//! Prompt templates for the generative pipeline steps.

/// Sentinel separating alternative questions in expansion responses.
pub const EXPANSION_SEPARATOR: &str = "#next-question#";

/// Token the self-query step returns when a question has no key terms.
pub const NO_TERMS_TOKEN: &str = "none";

/// Fixed response used when retrieval produced no context.
pub const NO_CONTEXT_RESPONSE: &str =
    "I apologize, but I couldn't find relevant information to answer your question.";

/// Builds the query-expansion prompt asking for `expand_to_n` alternative
/// phrasings separated by [`EXPANSION_SEPARATOR`].
pub fn expansion_prompt(question: &str, expand_to_n: usize) -> String {
    format!(
        "You are an AI language model assistant. Your task is to generate {expand_to_n} \
different versions of the given user question to retrieve relevant sections from earnings call transcripts. \
By generating multiple perspectives on the user question, your goal is to help the user overcome some limitations \
of the distance-based similarity search. Think of different ways to phrase questions about financial metrics, \
guidance, or executive commentary in the earnings calls. \
Provide these alternative questions separated by '{EXPANSION_SEPARATOR}'. \
Original question: {question}"
    )
}

/// Builds the self-query prompt extracting key terms and time references.
///
/// `today` is injected so relative timeframes ("next quarter") can be
/// anchored to a concrete date.
pub fn self_query_prompt(question: &str, today: &str) -> String {
    format!(
        "You are an AI language model assistant. Your task is to extract relevant key terms or metrics from the user's question. \
The required information that needs to be extracted includes metrics, financial terms, specific business keywords (e.g., revenue, guidance, profit), or time references (e.g., next quarter, last year). \
Additionally, if the question refers to upcoming or recent timeframes (e.g., \"next quarter,\" \"this year\"), append today's date in the format {today}. \
Your response should consist of only the extracted term(s) (e.g., revenue, guidance, next quarter as of {today}) separated by commas. \
If the user question does not contain any key terms, you should return the following token: {NO_TERMS_TOKEN}.\n\
\n\
For example:\n\
QUESTION 1:\n\
What is the revenue guidance for next quarter?\n\
RESPONSE 1:\n\
revenue, guidance, next quarter as of {today}\n\
\n\
QUESTION 2:\n\
Can you summarize the key metrics from this quarter?\n\
RESPONSE 2:\n\
key metrics, this quarter\n\
\n\
QUESTION 3:\n\
I'd like to know about future growth plans.\n\
RESPONSE 3:\n\
growth plans\n\
\n\
QUESTION 4:\n\
Show me the company's profit for last year.\n\
RESPONSE 4:\n\
profit, last year\n\
\n\
User question: {question}"
    )
}

/// Builds the intent-detection prompt demanding strict JSON output.
pub fn intent_prompt(question: &str) -> String {
    format!(
        "You are an AI assistant classifying questions about earnings call transcripts. \
Classify the user question into exactly one intent:\n\
- METADATA: asks about the stored documents themselves (counts, types, available companies)\n\
- COMPANY_TIMEFRAME: asks for a company's transcripts within a specific timeframe\n\
- COMPANY_TOPIC: asks for a company's transcripts about a specific topic\n\
- GENERAL: anything answered from transcript content via semantic search\n\
\n\
Respond with strict JSON only, no prose and no markdown fences, shaped as:\n\
{{\"intent\": \"<INTENT>\", \"reasoning\": \"<short reasoning>\", \"mongo_query\": <object or null>}}\n\
\n\
For non-GENERAL intents, mongo_query is a MongoDB filter over documents with \
fields `content` and `metadata` (e.g. {{\"metadata.type\": \"earnings_call\", \"$count\": \"document_count\"}} \
to count documents). For GENERAL, mongo_query must be null.\n\
\n\
User question: {question}"
    )
}

/// Builds the answer-generation prompt from retrieved context.
pub fn answer_prompt(question: &str, context: &str) -> String {
    format!(
        "Based on the following context, please provide a clear and concise answer to the question. \
If the context doesn't contain relevant information, please indicate that.\n\
\n\
Context:\n\
{context}\n\
\n\
Question:\n\
{question}\n\
\n\
Answer:"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expansion_prompt_carries_separator_and_count() {
        let p = expansion_prompt("What was EPS?", 2);
        assert!(p.contains(EXPANSION_SEPARATOR));
        assert!(p.contains("generate 2 different versions"));
        assert!(p.contains("What was EPS?"));
    }

    #[test]
    fn intent_prompt_names_all_intents() {
        let p = intent_prompt("How many transcripts are stored?");
        for label in ["METADATA", "COMPANY_TIMEFRAME", "COMPANY_TOPIC", "GENERAL"] {
            assert!(p.contains(label));
        }
    }

    #[test]
    fn self_query_prompt_injects_date() {
        let p = self_query_prompt("Revenue next quarter?", "2026-08-06");
        assert!(p.contains("2026-08-06"));
        assert!(p.contains(NO_TERMS_TOKEN));
    }
}
