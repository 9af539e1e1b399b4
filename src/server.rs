//! The HTTP layer: maps inbound requests onto the fetch/filter pipeline

use std::convert::Infallible;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use regex::Regex;
use warp::http::header::{CACHE_CONTROL, CONTENT_DISPOSITION, CONTENT_TYPE};
use warp::http::{HeaderValue, Response, StatusCode};
use warp::path::FullPath;
use warp::Filter;

use crate::client::Client;
use crate::config::Config;
use crate::filter;
use crate::grouping::GroupingTable;
use crate::ical;

/// Everything a request handler needs, shared across all request tasks
struct ServerState {
    client: Arc<Client>,
    groupings: GroupingTable,
    route: Regex,
    health_path: String,
}

/// Start the web server. Runs until the process is stopped.
pub async fn run(config: &Config, client: Arc<Client>) -> Result<(), Box<dyn Error>> {
    log::info!("Starting web server...");

    let route = Regex::new(&format!(
        "^{}/([^/]+)/ical$",
        regex::escape(&config.base_url_path)
    ))?;
    let state = Arc::new(ServerState {
        client,
        groupings: GroupingTable::new(config.groupings.clone(), config.default_group.clone()),
        route,
        health_path: format!("{}/health", config.base_url_path),
    });

    let address: SocketAddr = config.bind_address.parse()?;

    let state_filter = warp::any().map(move || state.clone());
    let routes = warp::get()
        .and(warp::path::full())
        // an absent query string is the same as an empty one
        .and(
            warp::query::raw()
                .or_else(|_| async { Ok::<(String,), warp::Rejection>((String::new(),)) }),
        )
        .and(state_filter)
        .and_then(handle_request);

    log::info!("Listening on {}", address);
    warp::serve(routes).run(address).await;

    Ok(())
}

/// Process one calendar request based on the URL and query parameters
async fn handle_request(
    path: FullPath,
    raw_query: String,
    state: Arc<ServerState>,
) -> Result<Response<String>, Infallible> {
    if path.as_str() == state.health_path {
        return Ok(json_response(
            serde_json::json!({ "status": "ok" }).to_string(),
        ));
    }

    // Get the target from the URL
    let target = match state.route.captures(path.as_str()) {
        Some(captures) => captures[1].to_string(),
        None => return Ok(plain_response(StatusCode::NOT_FOUND, "Invalid URL path")),
    };

    // Parsed by hand to keep parameter order and repeated keys intact
    let mut params: Vec<(String, String)> = url::form_urlencoded::parse(raw_query.as_bytes())
        .into_owned()
        .collect();

    // Extract the calendar type
    let cal_type = match params.iter().find(|(key, _)| key == "calType") {
        Some((_, value)) => value.clone(),
        None => {
            return Ok(plain_response(
                StatusCode::BAD_REQUEST,
                "Missing required parameter: calType",
            ))
        }
    };

    if !state.client.has_target(&target) {
        return Ok(plain_response(
            StatusCode::NOT_FOUND,
            format!("Unknown calendar target: {}", target),
        ));
    }
    if !state.groupings.contains(&cal_type) {
        return Ok(plain_response(
            StatusCode::BAD_REQUEST,
            format!("Unknown calendar type: {}", cal_type),
        ));
    }

    // Forward all the request params except calType
    params.retain(|(key, _)| key != "calType");

    let calendar = match filter::request_calendar(
        &*state.client,
        &target,
        &cal_type,
        &params,
        &state.groupings,
    )
    .await
    {
        Ok(calendar) => calendar,
        Err(err) => {
            return Ok(plain_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch calendar: {}", err),
            ))
        }
    };

    let mut response = Response::new(ical::build_from(&calendar));
    let headers = response.headers_mut();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/calendar; charset=utf-8"),
    );
    headers.insert(
        CACHE_CONTROL,
        HeaderValue::from_static("no-cache, must-revalidate"),
    );
    let disposition = format!("inline; filename=\"{}-{}.ics\"", target, cal_type);
    if let Ok(disposition) = HeaderValue::from_str(&disposition) {
        headers.insert(CONTENT_DISPOSITION, disposition);
    }

    Ok(response)
}

fn plain_response<S: Into<String>>(status: StatusCode, body: S) -> Response<String> {
    let mut response = Response::new(body.into());
    *response.status_mut() = status;
    response
}

fn json_response(body: String) -> Response<String> {
    let mut response = Response::new(body);
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}
