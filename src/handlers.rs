use crate::errors::AppError;
use crate::models::{
    AveragesQuery, ChartQuery, ChartResponse, HealthResponse, Metric, RouteAverage, Timeframe,
};
use crate::state::AppState;
use crate::stats::{chart_data, route_averages};
use crate::ui::render_index;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Html,
    Json,
};
use tracing::{debug, warn};

pub async fn index() -> Html<String> {
    Html(render_index(Timeframe::DEFAULT, Metric::DEFAULT))
}

pub async fn get_averages(
    State(state): State<AppState>,
    query: Result<Query<AveragesQuery>, QueryRejection>,
) -> Result<Json<Vec<RouteAverage>>, AppError> {
    let Query(query) = query?;
    let view = query.view.as_deref().unwrap_or(Timeframe::DEFAULT.as_str());

    let averages = match Timeframe::parse(view) {
        Some(timeframe) => route_averages(&state.bookings, timeframe),
        None => {
            warn!("unknown timeframe {view:?}, returning no routes");
            Vec::new()
        }
    };
    debug!(view, routes = averages.len(), "route averages");

    Ok(Json(averages))
}

pub async fn get_chart(
    State(state): State<AppState>,
    query: Result<Query<ChartQuery>, QueryRejection>,
) -> Result<Json<ChartResponse>, AppError> {
    let Query(query) = query?;
    let metric = match query.graph_type.as_deref() {
        None => Metric::DEFAULT,
        Some(tag) => {
            let metric = Metric::parse_or_default(tag);
            if metric.as_str() != tag {
                warn!("unknown graph type {tag:?}, using {}", metric.as_str());
            }
            metric
        }
    };

    let chart = chart_data(&state.bookings, metric);
    debug!(graph_type = metric.as_str(), days = chart.labels.len(), "daily chart");

    Ok(Json(ChartResponse {
        title: metric.title(),
        chart,
    }))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        bookings: state.bookings.len(),
    })
}
