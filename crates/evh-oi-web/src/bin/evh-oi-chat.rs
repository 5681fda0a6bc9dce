//! Terminal client for the document chat endpoints.
//!
//! Uploads a PDF for analysis, then asks one question and prints the
//! streamed answer as it arrives.
//!
//! Run with: cargo run -p evh-oi-web --bin evh-oi-chat -- nda.pdf "What is the term?"

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use clap::Parser;
use futures_util::StreamExt;
use serde_json::{json, Value};

use evh_oi_llm::ChatStreamAccumulator;

const CHAT_APOLOGY: &str = "I encountered an error processing your question. Please try again.";

#[derive(Parser, Debug)]
#[command(name = "evh-oi-chat", about = "Ask a question about an NDA via a running EVH OI server")]
struct Args {
    /// PDF to analyse
    pdf: PathBuf,

    /// Question about the document
    question: String,

    /// Base URL of the server
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    server: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let client = reqwest::Client::new();
    let base = args.server.trim_end_matches('/');

    let bytes = std::fs::read(&args.pdf).with_context(|| format!("reading {}", args.pdf.display()))?;
    let file_name = args
        .pdf
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document.pdf".to_string());

    let resp = client
        .post(format!("{base}/api/analyze-document"))
        .json(&json!({
            "fileData": format!("data:application/pdf;base64,{}", STANDARD.encode(&bytes)),
            "fileName": file_name,
            "schema": "nda_anatomy",
        }))
        .send()
        .await
        .context("analysis request failed")?;
    if !resp.status().is_success() {
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(Value::Null);
        anyhow::bail!("analysis failed ({status}): {}", body["error"].as_str().unwrap_or("unknown error"));
    }
    let analyzed: Value = resp.json().await?;
    println!("{}\n", analyzed["introMessage"].as_str().unwrap_or_default());

    if let Err(e) = ask(&client, base, &analyzed["analysis"], &args.question).await {
        eprintln!("error: {e:#}");
        println!("{CHAT_APOLOGY}");
    }
    Ok(())
}

async fn ask(client: &reqwest::Client, base: &str, analysis: &Value, question: &str) -> anyhow::Result<()> {
    let resp = client
        .post(format!("{base}/api/chat-document"))
        .json(&json!({ "message": question, "analysis": analysis, "context": "nda_analysis" }))
        .send()
        .await?
        .error_for_status()?;

    let mut stream = resp.bytes_stream();
    let mut acc = ChatStreamAccumulator::new();
    let mut printed = 0;
    let mut stdout = std::io::stdout();
    while let Some(chunk) = stream.next().await {
        if acc.push(&chunk?) {
            write!(stdout, "{}", &acc.text()[printed..])?;
            stdout.flush()?;
            printed = acc.text().len();
        }
    }
    let answer = acc.finish();
    writeln!(stdout, "{}", &answer[printed..])?;
    Ok(())
}
