use contracts::system::logs::{
    ExportLogsRequest, ExportLogsResponse, LogsQuery, LogsResponse,
};
use gloo_net::http::{Request, Response};

use super::error::{ApiError, LogsOperation};
use crate::shared::api_utils::{api_url, bearer};
use crate::system::auth::storage;

const LOGS_PATH: &str = "/api/logs";
const EXPORT_PATH: &str = "/api/logs/export";

/// Authorization header from the stored token, read fresh for every request
fn auth_header() -> Result<String, ApiError> {
    storage::get_token()
        .map(|token| bearer(&token))
        .ok_or(ApiError::MissingToken)
}

/// Path and query string of the logs request; unset filters are left out
pub fn logs_path(query: &LogsQuery) -> Result<String, ApiError> {
    let qs = serde_qs::to_string(query)
        .map_err(|e| ApiError::transport(LogsOperation::Fetch, e))?;
    if qs.is_empty() {
        Ok(LOGS_PATH.to_string())
    } else {
        Ok(format!("{}?{}", LOGS_PATH, qs))
    }
}

async fn error_detail(response: &Response) -> Option<String> {
    response
        .json::<serde_json::Value>()
        .await
        .ok()?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

async fn check_status(op: LogsOperation, response: &Response) -> Result<(), ApiError> {
    if response.ok() {
        return Ok(());
    }
    let detail = error_detail(response).await;
    Err(ApiError::from_status(op, response.status(), detail))
}

/// Fetch log rows for the given filter
pub async fn fetch_logs(query: &LogsQuery) -> Result<LogsResponse, ApiError> {
    let op = LogsOperation::Fetch;
    let auth = auth_header()?;
    let path = logs_path(query)?;

    let response = Request::get(&api_url(&path))
        .header("Authorization", &auth)
        .send()
        .await
        .map_err(|e| ApiError::transport(op, e))?;

    check_status(op, &response).await?;

    let body = response
        .json::<LogsResponse>()
        .await
        .map_err(|e| ApiError::transport(op, e))?;

    if !body.success {
        return Err(ApiError::Rejected {
            op,
            detail: body.message,
        });
    }
    Ok(body)
}

/// Ask the server to render the filtered logs as CSV
pub async fn export_logs(request: &ExportLogsRequest) -> Result<ExportLogsResponse, ApiError> {
    let op = LogsOperation::Export;
    let auth = auth_header()?;

    let response = Request::post(&api_url(EXPORT_PATH))
        .header("Authorization", &auth)
        .json(request)
        .map_err(|e| ApiError::transport(op, e))?
        .send()
        .await
        .map_err(|e| ApiError::transport(op, e))?;

    check_status(op, &response).await?;

    let body = response
        .json::<ExportLogsResponse>()
        .await
        .map_err(|e| ApiError::transport(op, e))?;

    if !body.success {
        return Err(ApiError::Rejected {
            op,
            detail: body.message,
        });
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contracts::system::logs::{LogFilter, UserFilter};

    fn window() -> LogFilter {
        LogFilter::trailing_window(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(), 30)
    }

    #[test]
    fn test_default_filter_query_string() {
        let path = logs_path(&window().to_query()).unwrap();
        assert_eq!(path, "/api/logs?date_from=2024-01-01&date_to=2024-01-31");
        assert!(!path.contains("username"));
        assert!(!path.contains("search"));
    }

    #[test]
    fn test_full_filter_query_string() {
        let mut filter = window();
        filter.user = UserFilter::Specific("jdoe".to_string());
        filter.search = "laptop".to_string();
        let path = logs_path(&filter.to_query()).unwrap();
        assert_eq!(
            path,
            "/api/logs?date_from=2024-01-01&date_to=2024-01-31&username=jdoe&search=laptop"
        );
    }

    #[test]
    fn test_empty_query_has_no_question_mark() {
        assert_eq!(logs_path(&LogsQuery::default()).unwrap(), "/api/logs");
    }
}
