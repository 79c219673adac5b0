use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use log::{debug, warn};
use serde_json::{json, Value};
use towngraph::api::Request;
use towngraph::Graph;

/// Answer newline-delimited JSON requests.
///
/// Every non-empty input line gets exactly one output line: the JSON
/// response, or an object with an `error` field when the request is
/// malformed or its parameters are invalid. Such errors do not stop
/// processing. Returns the number of answered lines.
pub fn answer_requests<R, W>(graph: &Graph, read: R, mut write: W) -> Result<usize>
where
    R: BufRead,
    W: Write,
{
    let mut answered = 0;

    for (idx, line) in read.lines().enumerate() {
        let line = line.context("cannot read request")?;
        if line.trim().is_empty() {
            continue;
        }

        let reply = answer_line(graph, &line).unwrap_or_else(|err| {
            warn!("Request on line {}: {}", idx + 1, err);
            json!({ "error": err })
        });

        writeln!(write, "{}", reply).context("cannot write response")?;
        answered += 1;
    }

    write.flush()?;

    Ok(answered)
}

fn answer_line(graph: &Graph, line: &str) -> Result<Value, String> {
    let request: Request =
        serde_json::from_str(line).map_err(|err| format!("invalid request: {}", err))?;
    debug!("Answering {:?}", request);

    let response = graph.answer(&request).map_err(|err| err.to_string())?;
    serde_json::to_value(response).map_err(|err| err.to_string())
}
