pub const SYSTEM_PROMPT: &str =
    "You are a research assistant that extracts verifiable factual claims from the web. \
Respond with a single JSON object and nothing else.";

pub fn claims_prompt(topic: &str) -> String {
    let mut text = String::new();
    text.push_str("Find factual claims about the topic below and attribute each one to web sources.\n\n");
    text.push_str("TOPIC:\n");
    text.push_str(topic.trim());
    text.push_str("\n\nRules:\n");
    text.push_str("1. Each claim must be a single, specific, checkable statement.\n");
    text.push_str("2. Cover different aspects of the topic; avoid near-duplicate claims.\n");
    text.push_str("3. Prefer sources from different domains; cite the original page, not a translation or redirect link.\n");
    text.push_str("4. Give every claim a short category and one or two sentences of context.\n");
    text.push_str("5. If nothing reliable can be found, say so in plain text without JSON.\n");
    text.push_str("\nOutput format:\n");
    text.push_str(
        "{\"metadata\":{\"topic_summary\":\"...\",\"total_claims\":0,\"extraction_date\":\"YYYY-MM-DD\"},\
\"claims\":[{\"claim\":\"...\",\"context\":\"...\",\"category\":\"...\",\
\"sources\":[{\"url\":\"https://...\",\"title\":\"...\"}],\"keywords\":[\"...\"]}]}\n",
    );
    text
}
