//! Prompt templates, one system/user pair per capability.
//!
//! The system prompt fixes tone and structure; the user prompt embeds the
//! snippet in a fenced block together with any goal or framework hint.

use domain::CodeSnippet;

pub fn explain_system_prompt() -> &'static str {
    "You are an expert code analysis assistant. Your job is to provide clear, \
comprehensive explanations of code snippets.

Guidelines:
1. Explain what the code does in plain language
2. Break down complex logic into understandable parts
3. Identify key programming concepts and patterns
4. Mention any potential issues or improvements
5. Use markdown formatting for better readability
6. Be concise but thorough

Format your response with clear sections using markdown headers."
}

pub fn explain_user_prompt(snippet: &CodeSnippet) -> String {
    let language_hint = snippet
        .language()
        .map(|language| format!(" (Language: {language})"))
        .unwrap_or_default();

    format!(
        "Please explain this code snippet{language_hint}:\n\n```{tag}\n{code}\n```\n\n\
Provide a clear explanation of what this code does, how it works, and any \
notable patterns or concepts it demonstrates.",
        tag = snippet.language().unwrap_or("text"),
        code = snippet.content(),
    )
}

pub fn refactor_system_prompt() -> &'static str {
    "You are an expert software engineer specializing in code refactoring.

Analyze the provided code snippet and suggest meaningful improvements. Focus on:
- Readability and maintainability
- Following best practices and design patterns
- Reducing complexity and eliminating code smells
- Making the code more testable

Provide a clear explanation of the changes, the refactored code in a fenced \
code block, and the specific benefits of each change. Format your response as \
a structured analysis with clear sections."
}

pub fn refactor_user_prompt(snippet: &CodeSnippet, goal: Option<&str>) -> String {
    let mut prompt = format!(
        "Please analyze and refactor the following code snippet:\n\n```{tag}\n{code}\n```\n",
        tag = snippet.language().unwrap_or("text"),
        code = snippet.content(),
    );

    if let Some(goal) = goal {
        prompt.push_str(&format!("\nSpecific refactoring goal: {goal}\n"));
    }

    prompt.push_str(
        "\nPlease provide:\n\
1. **Analysis**: What issues or improvements do you see?\n\
2. **Refactored Code**: The improved version, in a fenced code block\n\
3. **Benefits**: What advantages does this refactoring provide?\n\n\
Focus on practical, actionable improvements that enhance code quality.",
    );

    prompt
}

pub fn tests_system_prompt() -> &'static str {
    "You are an expert software engineer specializing in writing comprehensive \
unit tests.

Analyze the provided code snippet and generate a complete test scaffold \
covering happy paths, edge cases, error conditions, and input validation, \
mocking external dependencies where needed.

Use meaningful test names that describe behavior, structure tests with the \
Arrange-Act-Assert pattern, and include both positive and negative cases. \
Return the complete test code in a fenced code block, followed by any setup \
commands needed to run it."
}

pub fn tests_user_prompt(snippet: &CodeSnippet, test_framework: Option<&str>) -> String {
    let language_hint = snippet
        .language()
        .map(|language| format!(" ({language})"))
        .unwrap_or_default();
    let framework_hint = test_framework
        .map(|framework| format!(" using {framework}"))
        .unwrap_or_default();

    format!(
        "Please analyze the following code snippet{language_hint} and generate a \
comprehensive unit test scaffold{framework_hint}:\n\n```{tag}\n{code}\n```\n\n\
Provide the complete test implementation with all necessary imports, and note \
what scenarios are covered. If the code has external dependencies, include \
examples of how to mock them.",
        tag = snippet.language().unwrap_or("text"),
        code = snippet.content(),
    )
}
