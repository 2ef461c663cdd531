//! Prompt construction for the ReAct loop, the router, and the research agent.

use switchyard_core::tool::ToolDefinition;

/// Opening line used when an agent has no persona of its own.
pub const DEFAULT_PERSONA: &str = "You are a helpful assistant that can use tools.";

/// Grounded-answer instructions for the research agent.
pub const RESEARCH_SYSTEM_PROMPT: &str = "You are a research assistant. Answer the user's query \
based ONLY on the provided context. If the information is not in the context, say \
'I do not have enough information to answer that.'";

/// System prompt for the ReAct loop.
///
/// Lists every registered tool with its argument signature and describes
/// the reply protocol the response parser expects.
pub fn react_system_prompt(persona: Option<&str>, tools: &[ToolDefinition]) -> String {
    let mut prompt = String::new();
    prompt.push_str(persona.unwrap_or(DEFAULT_PERSONA));
    prompt.push_str("\n\nAvailable tools:\n");
    if tools.is_empty() {
        prompt.push_str("(none)\n");
    }
    for def in tools {
        prompt.push_str("- ");
        prompt.push_str(&def.signature());
        prompt.push('\n');
    }

    prompt.push_str(
        "\nTo answer the user's query, you must follow a strict loop:\n\
         1. Thought: First, think about what you need to do.\n\
         2. Action: If you need a tool, you MUST output a single JSON object with two keys: \
         {\"tool\": \"tool_name\", \"args\": {\"argument_name\": value, ...}}.\n\
         3. Final Answer: After you get a tool's result, or if you didn't need a tool, \
         provide the final answer to the user as a plain, complete sentence.\n\n\
         Respond with ONLY the JSON for an action or ONLY the final answer string. \
         Do not provide explanations for your actions.",
    );
    prompt
}

/// Classification prompt for the router.
///
/// `specialists` is `(name, description)` in registration order.
pub fn router_prompt(specialists: &[(&str, &str)], query: &str) -> String {
    let mut prompt = String::from(
        "You are a dispatcher. Your job is to route a user's query to the best-suited specialist agent.\n\n",
    );
    prompt.push_str(&format!("You have {} agents available:\n", specialists.len()));
    for (i, (name, description)) in specialists.iter().enumerate() {
        prompt.push_str(&format!("{}. {}: {}\n", i + 1, name, description));
    }

    let choices = specialists
        .iter()
        .map(|(name, _)| format!("\"{name}\""))
        .collect::<Vec<_>>()
        .join(" or ");

    prompt.push_str(&format!(
        "\nBased on the user's query, which agent should you choose?\n\n\
         User Query: \"{query}\"\n\n\
         Respond with ONLY the name of the agent: {choices}."
    ));
    prompt
}

/// User turn for the research agent.
pub fn research_user_message(context: &str, query: &str) -> String {
    format!("Context:\n{context}\n\nQuery: {query}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchyard_core::tool::{ArgType, ArgumentSchema};

    fn calculator_def() -> ToolDefinition {
        ToolDefinition {
            name: "calculator".into(),
            description: "Performs basic arithmetic".into(),
            arguments: ArgumentSchema::new()
                .arg("a", ArgType::Number, "")
                .arg("b", ArgType::Number, "")
                .arg("operation", ArgType::String, "")
                .args()
                .to_vec(),
        }
    }

    #[test]
    fn react_prompt_lists_tools() {
        let prompt = react_system_prompt(None, &[calculator_def()]);
        assert!(prompt.starts_with(DEFAULT_PERSONA));
        assert!(prompt.contains("- calculator(a: number, b: number, operation: string)"));
        assert!(prompt.contains("\"tool\""));
    }

    #[test]
    fn react_prompt_uses_persona() {
        let prompt = react_system_prompt(Some("You are MathAgent."), &[]);
        assert!(prompt.starts_with("You are MathAgent."));
        assert!(prompt.contains("(none)"));
    }

    #[test]
    fn router_prompt_enumerates_specialists() {
        let prompt = router_prompt(
            &[("MathAgent", "Does math"), ("ResearchAgent", "Looks things up")],
            "What is 50 plus 50?",
        );
        assert!(prompt.contains("You have 2 agents available"));
        assert!(prompt.contains("1. MathAgent: Does math"));
        assert!(prompt.contains("2. ResearchAgent: Looks things up"));
        assert!(prompt.contains("User Query: \"What is 50 plus 50?\""));
        assert!(prompt.ends_with("\"MathAgent\" or \"ResearchAgent\"."));
    }

    #[test]
    fn research_message_layout() {
        assert_eq!(
            research_user_message("ctx", "q?"),
            "Context:\nctx\n\nQuery: q?"
        );
    }
}
