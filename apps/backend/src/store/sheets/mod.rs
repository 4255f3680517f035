//! Google Sheets v4 implementation of [`SheetStore`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, StatusCode, Url};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use super::{SheetStore, SheetWrite, StoreError};
use crate::domain::{CellRange, Grid};

mod auth;

pub use auth::{ServiceAccountKey, TokenSource};

const SHEETS_API: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const DRIVE_FILES_API: &str = "https://www.googleapis.com/drive/v3/files";
const SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";
const VALUE_INPUT: &str = "USER_ENTERED";

/// How to find the spreadsheet backing the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpreadsheetTarget {
    Id(String),
    /// Literal title, resolved through the Drive files API.
    Name(String),
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Debug, Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Debug, Deserialize)]
struct DriveFileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
}

pub struct SheetsStore {
    http: reqwest::Client,
    auth: TokenSource,
    spreadsheet_id: String,
}

impl SheetsStore {
    /// Authenticate and resolve the target spreadsheet.
    ///
    /// Fails if the credentials are rejected or the spreadsheet cannot be found.
    pub async fn connect(
        key: ServiceAccountKey,
        target: SpreadsheetTarget,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Rejected(format!("failed to build http client: {e}")))?;
        let auth = TokenSource::new(key, http.clone())?;

        let mut store = Self {
            http,
            auth,
            spreadsheet_id: String::new(),
        };
        store.spreadsheet_id = match target {
            SpreadsheetTarget::Id(id) => id,
            SpreadsheetTarget::Name(name) => store.resolve_by_name(&name).await?,
        };

        // Touch the spreadsheet once so bad ids and missing shares fail at startup.
        let titles = store.worksheets().await?;
        info!(
            spreadsheet_id = %store.spreadsheet_id,
            client_email = %store.auth.client_email(),
            worksheets = titles.len(),
            "connected to spreadsheet"
        );
        Ok(store)
    }

    async fn resolve_by_name(&self, name: &str) -> Result<String, StoreError> {
        let mut url = parse_url(DRIVE_FILES_API)?;
        let query = format!(
            "name = '{}' and mimeType = '{SPREADSHEET_MIME}' and trashed = false",
            name.replace('\\', "\\\\").replace('\'', "\\'")
        );
        url.query_pairs_mut()
            .append_pair("q", &query)
            .append_pair("fields", "files(id)")
            .append_pair("pageSize", "1");

        let body = self.execute(Method::GET, url, None, None).await?;
        let list: DriveFileList = decode(body)?;
        list.files
            .into_iter()
            .next()
            .map(|f| f.id)
            .ok_or_else(|| StoreError::SpreadsheetNotFound(name.to_string()))
    }

    fn spreadsheet_url(&self, segments: &[&str]) -> Result<Url, StoreError> {
        let mut url = parse_url(SHEETS_API)?;
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| StoreError::Rejected("sheets api url cannot be a base".into()))?;
            path.push(&self.spreadsheet_id);
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    fn values_url(&self, a1: &str) -> Result<Url, StoreError> {
        self.spreadsheet_url(&["values", a1])
    }

    /// Send an authorized request, re-minting the token once on a 401.
    async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
        sheet: Option<&str>,
    ) -> Result<Value, StoreError> {
        let mut retried_auth = false;
        loop {
            let token = self.auth.token().await?;
            let mut request = self.http.request(method.clone(), url.clone()).bearer_auth(token);
            if let Some(body) = body {
                request = request.json(body);
            }
            let resp = request.send().await?;
            let status = resp.status();
            let text = resp.text().await?;

            if status == StatusCode::UNAUTHORIZED && !retried_auth {
                debug!("sheets api rejected access token, refreshing");
                self.auth.invalidate().await;
                retried_auth = true;
                continue;
            }
            if !status.is_success() {
                return Err(classify_response(status, &text, sheet));
            }
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            return serde_json::from_str(&text)
                .map_err(|e| StoreError::Malformed(format!("invalid JSON from sheets api: {e}")));
        }
    }
}

fn parse_url(raw: &str) -> Result<Url, StoreError> {
    Url::parse(raw).map_err(|e| StoreError::Rejected(format!("invalid url {raw}: {e}")))
}

fn decode<T: serde::de::DeserializeOwned>(body: Value) -> Result<T, StoreError> {
    serde_json::from_value(body).map_err(|e| StoreError::Malformed(e.to_string()))
}

/// `'Sheet Title'!A1:B2`, doubling any quote inside the title.
fn qualified(sheet: &str, range: Option<CellRange>) -> String {
    let title = format!("'{}'", sheet.replace('\'', "''"));
    match range {
        Some(range) => format!("{title}!{range}"),
        None => title,
    }
}

/// Formatted values come back as strings; anything else is stringified.
fn cell_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        Value::Bool(b) => (if b { "TRUE" } else { "FALSE" }).to_string(),
        other => other.to_string(),
    }
}

fn into_grid(range: ValueRange) -> Grid {
    range
        .values
        .into_iter()
        .map(|row| row.into_iter().map(cell_to_string).collect())
        .collect()
}

fn classify_response(status: StatusCode, body: &str, sheet: Option<&str>) -> StoreError {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.chars().take(200).collect());

    match status {
        StatusCode::BAD_REQUEST if detail.contains("Unable to parse range") => match sheet {
            Some(sheet) => StoreError::WorksheetNotFound(sheet.to_string()),
            None => StoreError::Rejected(detail),
        },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StoreError::Auth(detail),
        StatusCode::NOT_FOUND => StoreError::SpreadsheetNotFound(detail),
        StatusCode::TOO_MANY_REQUESTS => StoreError::Throttled(detail),
        s if s.is_server_error() => StoreError::Upstream {
            status: s.as_u16(),
            detail,
        },
        _ => StoreError::Rejected(detail),
    }
}

#[async_trait]
impl SheetStore for SheetsStore {
    async fn worksheets(&self) -> Result<Vec<String>, StoreError> {
        let mut url = self.spreadsheet_url(&[])?;
        url.query_pairs_mut()
            .append_pair("fields", "sheets.properties.title");
        let body = self.execute(Method::GET, url, None, None).await?;
        let meta: SpreadsheetMeta = decode(body)?;
        Ok(meta.sheets.into_iter().map(|s| s.properties.title).collect())
    }

    async fn get(&self, sheet: &str, range: CellRange) -> Result<Grid, StoreError> {
        let url = self.values_url(&qualified(sheet, Some(range)))?;
        let body = self.execute(Method::GET, url, None, Some(sheet)).await?;
        Ok(into_grid(decode(body)?))
    }

    async fn update(&self, sheet: &str, range: CellRange, values: &Grid) -> Result<(), StoreError> {
        let a1 = qualified(sheet, Some(range));
        let mut url = self.values_url(&a1)?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", VALUE_INPUT);
        let body = json!({ "range": a1, "majorDimension": "ROWS", "values": values });
        self.execute(Method::PUT, url, Some(&body), Some(sheet)).await?;
        Ok(())
    }

    async fn batch_update(&self, writes: &[SheetWrite]) -> Result<(), StoreError> {
        if writes.is_empty() {
            return Ok(());
        }
        let url = self.spreadsheet_url(&["values:batchUpdate"])?;
        let data: Vec<Value> = writes
            .iter()
            .map(|w| {
                json!({
                    "range": qualified(&w.sheet, Some(w.range)),
                    "majorDimension": "ROWS",
                    "values": w.values,
                })
            })
            .collect();
        let body = json!({ "valueInputOption": VALUE_INPUT, "data": data });
        let only_sheet = match writes {
            [single] => Some(single.sheet.as_str()),
            _ => None,
        };
        self.execute(Method::POST, url, Some(&body), only_sheet).await?;
        Ok(())
    }

    async fn clear(&self, sheet: &str) -> Result<(), StoreError> {
        let url = self.values_url(&format!("{}:clear", qualified(sheet, None)))?;
        self.execute(Method::POST, url, Some(&json!({})), Some(sheet))
            .await?;
        Ok(())
    }

    async fn append_rows(&self, sheet: &str, rows: &[Vec<String>]) -> Result<(), StoreError> {
        let a1 = qualified(sheet, Some(CellRange::cell(1, 1)));
        let mut url = self.values_url(&format!("{a1}:append"))?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", VALUE_INPUT)
            .append_pair("insertDataOption", "INSERT_ROWS");
        let body = json!({ "majorDimension": "ROWS", "values": rows });
        self.execute(Method::POST, url, Some(&body), Some(sheet)).await?;
        Ok(())
    }

    async fn get_all_values(&self, sheet: &str) -> Result<Grid, StoreError> {
        let url = self.values_url(&qualified(sheet, None))?;
        let body = self.execute(Method::GET, url, None, Some(sheet)).await?;
        Ok(into_grid(decode(body)?))
    }
}
