//! Natural-language → Cypher translation.
//!
//! The LLM writes the query; it runs with no parameter binding. Execution
//! failures are reported inside [`GraphInfo`] instead of being raised, and
//! text containing write or admin clauses is refused before it reaches the
//! database.

use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::graph::schema::GRAPH_SCHEMA;
use crate::graph::talent::TalentStore;
use crate::graph::Row;
use crate::llm_client::prompts::render;
use crate::llm_client::{strip_code_fences, ChatMessage, ChatModel};

pub mod handlers;
pub mod prompts;

use prompts::{CYPHER_PROMPT_TEMPLATE, CYPHER_SYSTEM};

/// Clauses that modify data, schema or security.
const WRITE_CLAUSES: &[&str] = &[
    "CREATE", "MERGE", "DELETE", "DETACH", "SET", "REMOVE", "DROP", "FOREACH", "ALTER", "RENAME",
    "GRANT", "DENY", "REVOKE",
];

/// Admin commands that only count with the word that follows them.
const ADMIN_COMMANDS: &[(&str, &str)] = &[
    ("TERMINATE", "TRANSACTION"),
    ("TERMINATE", "TRANSACTIONS"),
    ("START", "DATABASE"),
    ("STOP", "DATABASE"),
    ("LOAD", "CSV"),
];

/// Outcome of answering a question from the graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphInfo {
    pub query: String,
    pub cypher_query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub results: Vec<Row>,
}

pub fn build_messages(question: &str, schema: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(CYPHER_SYSTEM),
        ChatMessage::user(render(
            CYPHER_PROMPT_TEMPLATE,
            &[("schema", schema), ("question", question)],
        )),
    ]
}

/// Asks the LLM for a query answering `question` over `schema`.
/// The text is returned unvalidated, minus surrounding code fences.
pub async fn translate(
    llm: &dyn ChatModel,
    question: &str,
    schema: &str,
) -> Result<String, AppError> {
    let raw = llm.complete(&build_messages(question, schema)).await?;
    let cypher = strip_code_fences(&raw).to_string();
    debug!("Translated question into: {cypher}");
    Ok(cypher)
}

/// Blanks out string literals, quoted names and comments so their text is
/// never read as a clause. `None` when one of them is left unterminated.
fn strip_literals(statement: &str) -> Option<String> {
    let mut out = String::with_capacity(statement.len());
    let mut chars = statement.chars().peekable();
    while let Some(c) = chars.next() {
        let next = chars.peek().copied();
        match c {
            '\'' | '"' | '`' => {
                out.push(' ');
                let mut closed = false;
                while let Some(inner) = chars.next() {
                    out.push(' ');
                    if inner == c {
                        closed = true;
                        break;
                    }
                    // backslash escapes apply to strings, not to quoted names
                    if inner == '\\' && c != '`' {
                        chars.next()?;
                        out.push(' ');
                    }
                }
                if !closed {
                    return None;
                }
            }
            '/' if next == Some('/') => {
                out.push(' ');
                while chars.next_if(|n| *n != '\n').is_some() {
                    out.push(' ');
                }
            }
            '/' if next == Some('*') => {
                chars.next();
                out.push_str("  ");
                let mut prev = ' ';
                let mut closed = false;
                for inner in chars.by_ref() {
                    out.push(' ');
                    if prev == '*' && inner == '/' {
                        closed = true;
                        break;
                    }
                    prev = inner;
                }
                if !closed {
                    return None;
                }
            }
            _ => out.push(c),
        }
    }
    Some(out)
}

/// Splits on anything but word characters, keeping a leading `{` or `(`.
/// Property keys (`r.start`) are dropped.
fn clause_tokens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    let mut property = false;
    let mut last = ' ';
    for (i, c) in text.char_indices() {
        let word = c.is_alphanumeric() || matches!(c, '_' | '{' | '(');
        match start {
            None if word => {
                start = Some(i);
                property = last == '.';
            }
            Some(s) if !word => {
                if !property {
                    tokens.push(&text[s..i]);
                }
                start = None;
            }
            _ => {}
        }
        last = c;
    }
    if let Some(s) = start {
        if !property {
            tokens.push(&text[s..]);
        }
    }
    tokens
}

/// Returns the first write/admin construct found in `statement`, if any.
pub fn find_write_clause(statement: &str) -> Option<String> {
    let Some(stripped) = strip_literals(statement) else {
        return Some("unterminated string or comment".to_string());
    };
    let upper = stripped.to_uppercase();
    let tokens = clause_tokens(&upper);

    for (i, token) in tokens.iter().enumerate() {
        let word = token.trim_start_matches(['{', '(']);
        if let Some(clause) = WRITE_CLAUSES.iter().find(|c| **c == word) {
            return Some(clause.to_string());
        }
        let next = tokens.get(i + 1).copied().unwrap_or_default();
        if let Some((first, second)) = ADMIN_COMMANDS
            .iter()
            .find(|(first, second)| *first == word && *second == next)
        {
            return Some(format!("{first} {second}"));
        }
        // CALL { ... } subqueries are fine; procedure calls are not
        if word == "CALL" && !next.is_empty() && !next.starts_with(['{', '(']) {
            return Some(format!("CALL {next}"));
        }
    }
    None
}

/// Translates `question`, runs the result and reports rows or the failure.
/// LLM failures propagate; anything after translation lands in `GraphInfo`.
pub async fn retrieve_graph_info(
    llm: &dyn ChatModel,
    store: &dyn TalentStore,
    question: &str,
) -> Result<GraphInfo, AppError> {
    let cypher_query = translate(llm, question, GRAPH_SCHEMA).await?;

    if let Some(clause) = find_write_clause(&cypher_query) {
        warn!("Refusing generated query containing {clause}: {cypher_query}");
        return Ok(GraphInfo {
            query: question.to_string(),
            cypher_query,
            error: Some(
                AppError::Translation(format!(
                    "generated query refused ({clause}); only read queries are executed"
                ))
                .to_string(),
            ),
            results: Vec::new(),
        });
    }

    match store.execute_raw(&cypher_query).await {
        Ok(results) => Ok(GraphInfo {
            query: question.to_string(),
            cypher_query,
            error: None,
            results,
        }),
        Err(e) => {
            warn!("Generated query failed: {e}");
            Ok(GraphInfo {
                query: question.to_string(),
                cypher_query,
                error: Some(e.to_string()),
                results: Vec::new(),
            })
        }
    }
}
