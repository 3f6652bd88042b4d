use axum::{Json, extract::State, response::IntoResponse};
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::tool_dto::*},
    error::AppError,
    tools::calculators::{
        ActivityLevel, Sex, calculate_bmi, calculate_daily_calories, calculate_water_intake,
    },
};

pub async fn bmi(
    State(_state): State<AppState>,
    Json(request): Json<BmiRequest>,
) -> Result<impl IntoResponse, AppError> {
    debug!(
        weight_kg = request.weight_kg,
        height_cm = request.height_cm,
        "BMI calculation requested"
    );

    let report = calculate_bmi(request.weight_kg, request.height_cm / 100.0)?;

    Ok(Json(BmiResponse {
        bmi: report.bmi,
        category: report.band.label().to_string(),
        advice: report.advice.to_string(),
        message: report.message,
    }))
}

pub async fn water(
    State(_state): State<AppState>,
    Json(request): Json<WaterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let activity = request
        .activity
        .as_deref()
        .map(ActivityLevel::parse_or_default)
        .unwrap_or(ActivityLevel::Moderate);

    let report = calculate_water_intake(request.weight_kg, activity)?;

    Ok(Json(WaterResponse {
        water_liters: report.liters,
        water_glasses: report.glasses,
        message: report.message,
    }))
}

pub async fn calories(
    State(_state): State<AppState>,
    Json(request): Json<CalorieRequest>,
) -> Result<impl IntoResponse, AppError> {
    let sex = Sex::parse(&request.sex)?;
    let activity = request
        .activity
        .as_deref()
        .map(ActivityLevel::parse_or_default)
        .unwrap_or(ActivityLevel::Moderate);

    let report = calculate_daily_calories(
        request.age,
        request.weight_kg,
        request.height_cm,
        sex,
        activity,
    )?;

    Ok(Json(CalorieResponse {
        maintenance_calories: report.maintenance,
        weight_loss_calories: report.weight_loss,
        weight_gain_calories: report.weight_gain,
        bmr: report.bmr,
        message: report.message,
    }))
}
