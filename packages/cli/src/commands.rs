use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, bail};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

pub fn hash_password(password: Option<String>) -> anyhow::Result<()> {
    let password = match password {
        Some(p) => p,
        None => prompt_secret("Password: ")?,
    };
    if password.is_empty() {
        bail!("password must not be empty");
    }

    let hash = common::password::hash_password(&password)?;
    println!("{hash}");
    Ok(())
}

pub async fn health(api: &str) -> anyhow::Result<()> {
    let res = Client::new()
        .get(endpoint(api, "/api/health"))
        .send()
        .await
        .with_context(|| format!("could not reach {api}"))?;
    let body: Value = ensure_success(res).await?.json().await?;
    println!("{body}");
    Ok(())
}

pub async fn login(api: &str, email: &str, password: Option<String>) -> anyhow::Result<()> {
    let password = match password {
        Some(p) => p,
        None => prompt_secret("Password: ")?,
    };

    let res = Client::new()
        .post(endpoint(api, "/api/admin/auth/login"))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .with_context(|| format!("could not reach {api}"))?;
    let body: LoginResponse = ensure_success(res).await?.json().await?;
    println!("{}", body.token);
    Ok(())
}

pub async fn upload(api: &str, token: &str, file: &Path) -> anyhow::Result<()> {
    let bytes = tokio::fs::read(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;
    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .context("upload path has no file name")?;

    let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
    let res = Client::new()
        .post(endpoint(api, "/api/admin/upload"))
        .bearer_auth(token)
        .multipart(reqwest::multipart::Form::new().part("file", part))
        .send()
        .await
        .with_context(|| format!("could not reach {api}"))?;
    let body: Value = ensure_success(res).await?.json().await?;
    println!("{}", serde_json::to_string_pretty(&body["image"])?);
    Ok(())
}

fn endpoint(api: &str, path: &str) -> String {
    format!("{}{path}", api.trim_end_matches('/'))
}

async fn ensure_success(res: Response) -> anyhow::Result<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let text = res.text().await.unwrap_or_default();
    bail!("{}", describe_failure(status.as_u16(), &text))
}

fn describe_failure(status: u16, text: &str) -> String {
    match serde_json::from_str::<ErrorBody>(text) {
        Ok(err) => format!("{status} {}: {}", err.code, err.message),
        Err(_) if text.trim().is_empty() => format!("request failed with status {status}"),
        Err(_) => format!("{status}: {}", text.trim()),
    }
}

fn prompt_secret(prompt: &str) -> anyhow::Result<String> {
    eprint!("{prompt}");
    io::stderr().flush()?;
    read_secret(io::stdin().lock())
}

fn read_secret(mut input: impl BufRead) -> anyhow::Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
