use std::path::PathBuf;

use anyhow::Context;
use log::info;
use reqwest::{Client, ClientBuilder, Response, StatusCode, Url};
use serde::Serialize;
use serde_json::{Value, json};

/// Somewhere an assembled timetable can be written. Every publish replaces
/// whatever the destination held before.
#[allow(async_fn_in_trait)]
pub trait GridPublisher {
    async fn publish(&self, destination: &str, rows: &[Vec<String>]) -> anyhow::Result<()>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueRange<'a> {
    range: String,
    major_dimension: &'static str,
    values: &'a [Vec<String>],
}

// Size of a worksheet added on first publish.
const NEW_SHEET_ROWS: u32 = 100;
const NEW_SHEET_COLUMNS: u32 = 20;

/// A worksheet name as Sheets expects it inside a range: single quoted, with
/// embedded quotes doubled.
fn quote_sheet(sheet: &str) -> String {
    format!("'{}'", sheet.replace('\'', "''"))
}

fn a1_range(sheet: &str) -> String {
    format!("{}!A1", quote_sheet(sheet))
}

/// A non-success reply from the spreadsheet API.
#[derive(Debug)]
pub struct SheetsApiError {
    status: StatusCode,
    message: String,
}

impl SheetsApiError {
    // Sheets answers a range on a worksheet that does not exist with 400.
    fn is_missing_range(&self) -> bool {
        self.status == StatusCode::BAD_REQUEST && self.message.contains("Unable to parse range")
    }
}

impl std::fmt::Display for SheetsApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SheetsApiError: {}: {}", self.status, self.message)
    }
}

impl std::error::Error for SheetsApiError {}

async fn ensure_success(response: Response) -> Result<Response, SheetsApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|json| json.get("error").cloned())
        .map(|error| match error.get("message").and_then(Value::as_str) {
            Some(message) => message.to_string(),
            None => error.to_string(),
        })
        .unwrap_or(body);
    Err(SheetsApiError { status, message })
}

/// Writes through the Google Sheets v4 values API. `api_url` is the
/// spreadsheet resource, e.g. `https://sheets.googleapis.com/v4/spreadsheets/<id>`.
pub struct SheetsPublisher {
    client: Client,
    api_url: Url,
    access_token: String,
}

impl SheetsPublisher {
    pub fn new(api_url: &str, access_token: &str) -> anyhow::Result<Self> {
        let client = ClientBuilder::new().build()?;
        Self::with_client(client, api_url, access_token)
    }

    pub fn with_client(client: Client, api_url: &str, access_token: &str) -> anyhow::Result<Self> {
        let api_url = Url::parse(api_url.trim_end_matches('/'))
            .with_context(|| format!("invalid spreadsheet API url {api_url}"))?;
        if api_url.cannot_be_a_base() {
            anyhow::bail!("spreadsheet API url {api_url} has no path");
        }
        Ok(Self {
            client,
            api_url,
            access_token: access_token.to_string(),
        })
    }

    /// `{api}/values/{segment}` with `segment` percent-encoded as one path
    /// segment.
    fn values_url(&self, segment: &str) -> Url {
        let mut url = self.api_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push("values").push(segment);
        }
        url
    }

    fn batch_update_url(&self) -> Url {
        let mut url = self.api_url.clone();
        let path = format!("{}:batchUpdate", url.path());
        url.set_path(&path);
        url
    }

    async fn clear(&self, sheet: &str) -> anyhow::Result<()> {
        let response = self
            .client
            .post(self.values_url(&format!("{}:clear", quote_sheet(sheet))))
            .bearer_auth(&self.access_token)
            .json(&json!({}))
            .send()
            .await
            .context("failed to reach spreadsheet API")?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn add_sheet(&self, sheet: &str) -> anyhow::Result<()> {
        let body = json!({
            "requests": [{
                "addSheet": {
                    "properties": {
                        "title": sheet,
                        "gridProperties": {
                            "rowCount": NEW_SHEET_ROWS,
                            "columnCount": NEW_SHEET_COLUMNS,
                        },
                    },
                },
            }],
        });
        let response = self
            .client
            .post(self.batch_update_url())
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .context("failed to reach spreadsheet API")?;
        ensure_success(response)
            .await
            .with_context(|| format!("failed to add worksheet {sheet}"))?;
        Ok(())
    }

    async fn write(&self, sheet: &str, rows: &[Vec<String>]) -> anyhow::Result<()> {
        let range = a1_range(sheet);
        let body = ValueRange {
            range: range.clone(),
            major_dimension: "ROWS",
            values: rows,
        };
        let response = self
            .client
            .put(self.values_url(&range))
            .query(&[("valueInputOption", "RAW")])
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .context("failed to reach spreadsheet API")?;
        ensure_success(response)
            .await
            .with_context(|| format!("failed to update worksheet {sheet}"))?;
        Ok(())
    }
}

impl GridPublisher for SheetsPublisher {
    /// Clears the worksheet, adding it first if the spreadsheet lacks it, then
    /// writes every row from `A1`.
    async fn publish(&self, destination: &str, rows: &[Vec<String>]) -> anyhow::Result<()> {
        match self.clear(destination).await {
            Ok(()) => {}
            Err(e)
                if e
                    .downcast_ref::<SheetsApiError>()
                    .is_some_and(SheetsApiError::is_missing_range) =>
            {
                info!("Worksheet {destination} not found, adding it");
                self.add_sheet(destination).await?;
            }
            Err(e) => return Err(e.context(format!("failed to clear worksheet {destination}"))),
        }
        self.write(destination, rows).await?;

        info!("Schedule data saved to worksheet {destination}");
        Ok(())
    }
}

/// Writes the rows as JSON to a local file, for runs without spreadsheet
/// credentials.
pub struct JsonFilePublisher {
    path: PathBuf,
}

impl JsonFilePublisher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl GridPublisher for JsonFilePublisher {
    async fn publish(&self, destination: &str, rows: &[Vec<String>]) -> anyhow::Result<()> {
        let document = json!({
            "worksheet": destination,
            "values": rows,
        });
        let contents = serde_json::to_string_pretty(&document)?;
        tokio::fs::write(&self.path, contents)
            .await
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        info!("Schedule data saved to {}", self.path.display());
        Ok(())
    }
}
