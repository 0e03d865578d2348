//! Crop, weather and soil insights served under `/api/ai`.
//!
//! [`PlaceholderInsights`] answers with fixed, deterministic figures until
//! real satellite and weather sources are wired in behind
//! [`InsightProvider`].

use agriscout_core::error::Result;
use async_trait::async_trait;
use chrono::{Days, NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;

/// Longest forecast served
pub const MAX_FORECAST_DAYS: usize = 16;

/// Forecast length when none is requested
pub const DEFAULT_FORECAST_DAYS: usize = 7;

/// Service type reported when a chat request names none
pub const DEFAULT_SERVICE_TYPE: &str = "general";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatInsight {
    pub text: String,
    pub confidence: f64,
    pub related_services: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NdviReading {
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub status: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MlviReading {
    pub average: f64,
    pub status: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StressZone {
    pub zone: String,
    pub severity: String,
    pub area: String,
    pub possible_causes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CropAnalysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Value>,
    pub ndvi: NdviReading,
    pub mlvi: MlviReading,
    pub stress_zones: Vec<StressZone>,
    pub heatmap_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherLocation {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    pub temperature: i32,
    pub humidity: i32,
    pub rainfall: i32,
    pub wind_speed: i32,
    pub condition: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperatureRange {
    pub min: i32,
    pub max: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub temp: TemperatureRange,
    pub rainfall: i32,
    pub humidity: i32,
    pub condition: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherAlert {
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    pub location: WeatherLocation,
    pub current: CurrentConditions,
    pub forecast: Vec<ForecastDay>,
    pub alerts: Vec<WeatherAlert>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub level: i32,
    pub status: String,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutrientLevel {
    pub level: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Nutrients {
    pub nitrogen: NutrientLevel,
    pub phosphorus: NutrientLevel,
    pub potassium: NutrientLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhReading {
    pub value: f64,
    pub status: String,
    pub range: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrganicMatter {
    pub percentage: f64,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilAnalysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_id: Option<String>,
    pub moisture: Measurement,
    pub nutrients: Nutrients,
    pub ph: PhReading,
    pub organic_matter: OrganicMatter,
    pub recommendations: Vec<String>,
}

/// One recommended action; optional fields depend on the kind of action
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterventionAction {
    pub priority: String,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_impact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    pub immediate: String,
    pub long_term: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterventionPlan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stress_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    pub immediate_actions: Vec<InterventionAction>,
    pub long_term_recommendations: Vec<String>,
    pub estimated_cost: CostEstimate,
}

/// Advertised AI service
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceDescriptor {
    #[serde(skip)]
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub capabilities: Vec<&'static str>,
}

/// Parameters shared by the per-field insight calls
#[derive(Debug, Clone, Default)]
pub struct FieldQuery {
    pub field_id: Option<String>,
    pub coordinates: Option<Value>,
}

/// Port for agronomic insights
#[async_trait]
pub trait InsightProvider: Send + Sync {
    /// Answer a free-text question for a service type
    async fn chat(&self, query: &str, service_type: Option<&str>) -> Result<ChatInsight>;

    async fn analyze_crop(&self, field: &FieldQuery) -> Result<CropAnalysis>;

    /// Forecast `days` days ahead, clamped to [`MAX_FORECAST_DAYS`]
    async fn forecast_weather(
        &self,
        latitude: Option<f64>,
        longitude: Option<f64>,
        days: Option<usize>,
    ) -> Result<WeatherReport>;

    async fn analyze_soil(&self, field: &FieldQuery) -> Result<SoilAnalysis>;

    async fn interventions(
        &self,
        field: &FieldQuery,
        stress_type: Option<&str>,
        severity: Option<&str>,
    ) -> Result<InterventionPlan>;

    fn services(&self) -> Vec<ServiceDescriptor>;
}

/// Fixed figures for development and demos
#[derive(Debug, Clone, Default)]
pub struct PlaceholderInsights {
    today: Option<NaiveDate>,
}

impl PlaceholderInsights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the first forecast date
    pub fn with_date(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }

    fn chat_text(query: &str, service_type: Option<&str>) -> String {
        match service_type {
            Some("crop_health") => "Your field shows healthy vegetation with average NDVI of 0.72. \
                Some stress detected in northeast corner - likely water stress."
                .to_string(),
            Some("weather") => "Next 7 days forecast: Temperature 22-32°C, 40% chance of rain on \
                day 3, high UV index expected."
                .to_string(),
            Some("soil") => "Soil moisture is at 45% (adequate). Nitrogen levels are medium, but \
                phosphorus is low. Consider applying DAP fertilizer."
                .to_string(),
            Some("intervention") => "Recommended actions: 1) Increase irrigation in stressed \
                zones, 2) Apply nitrogen fertilizer (25kg/hectare), 3) Monitor for pest activity."
                .to_string(),
            _ => format!(
                "I understand you're asking about \"{}\". Based on satellite data and weather \
                 patterns, I can help you with crop health monitoring and interventions. What \
                 specific information do you need?",
                query
            ),
        }
    }
}

const FORECAST_CONDITIONS: [&str; 4] = ["sunny", "partly_cloudy", "cloudy", "rainy"];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[async_trait]
impl InsightProvider for PlaceholderInsights {
    async fn chat(&self, query: &str, service_type: Option<&str>) -> Result<ChatInsight> {
        Ok(ChatInsight {
            text: Self::chat_text(query, service_type),
            confidence: 0.85,
            related_services: strings(&["crop_analysis", "weather_forecast", "intervention"]),
        })
    }

    async fn analyze_crop(&self, field: &FieldQuery) -> Result<CropAnalysis> {
        let heatmap_id = field.field_id.as_deref().unwrap_or("unknown");
        Ok(CropAnalysis {
            field_id: field.field_id.clone(),
            coordinates: field.coordinates.clone(),
            ndvi: NdviReading {
                average: 0.72,
                min: 0.45,
                max: 0.89,
                status: "healthy".to_string(),
                timestamp: Utc::now().to_rfc3339(),
            },
            mlvi: MlviReading {
                average: 0.68,
                status: "mild_stress".to_string(),
                recommendation: "Monitor closely, consider irrigation".to_string(),
            },
            stress_zones: vec![StressZone {
                zone: "northeast_corner".to_string(),
                severity: "moderate".to_string(),
                area: "0.5 hectares".to_string(),
                possible_causes: strings(&["water_stress", "nutrient_deficiency"]),
            }],
            heatmap_url: format!("/api/heatmaps/{}", heatmap_id),
        })
    }

    async fn forecast_weather(
        &self,
        latitude: Option<f64>,
        longitude: Option<f64>,
        days: Option<usize>,
    ) -> Result<WeatherReport> {
        let days = days.unwrap_or(DEFAULT_FORECAST_DAYS).min(MAX_FORECAST_DAYS);
        let today = self.today();

        let forecast = (0..days)
            .map(|i| {
                let condition = FORECAST_CONDITIONS[i % FORECAST_CONDITIONS.len()];
                ForecastDay {
                    date: today.checked_add_days(Days::new(i as u64)).unwrap_or(today),
                    temp: TemperatureRange { min: 22, max: 32 },
                    rainfall: if condition == "rainy" { 12 } else { 0 },
                    humidity: 60 + ((i * 7) % 20) as i32,
                    condition: condition.to_string(),
                }
            })
            .collect();

        Ok(WeatherReport {
            location: WeatherLocation { latitude, longitude },
            current: CurrentConditions {
                temperature: 28,
                humidity: 65,
                rainfall: 0,
                wind_speed: 12,
                condition: "partly_cloudy".to_string(),
            },
            forecast,
            alerts: vec![WeatherAlert {
                kind: "heatwave".to_string(),
                severity: "moderate".to_string(),
                message: "High temperatures expected for next 3 days. Increase irrigation \
                    frequency."
                    .to_string(),
            }],
        })
    }

    async fn analyze_soil(&self, field: &FieldQuery) -> Result<SoilAnalysis> {
        let nutrient = |level: &str, recommendation: &str| NutrientLevel {
            level: level.to_string(),
            recommendation: recommendation.to_string(),
        };

        Ok(SoilAnalysis {
            field_id: field.field_id.clone(),
            moisture: Measurement {
                level: 45,
                status: "adequate".to_string(),
                unit: "percentage".to_string(),
            },
            nutrients: Nutrients {
                nitrogen: nutrient("medium", "Add 20kg/hectare urea"),
                phosphorus: nutrient("low", "Apply DAP fertilizer"),
                potassium: nutrient("adequate", "Maintain current levels"),
            },
            ph: PhReading {
                value: 6.8,
                status: "optimal".to_string(),
                range: "6.0-7.5".to_string(),
            },
            organic_matter: OrganicMatter { percentage: 3.2, status: "good".to_string() },
            recommendations: strings(&[
                "Maintain soil moisture between 40-60%",
                "Apply phosphorus-rich fertilizer within 2 weeks",
                "Consider crop rotation to improve nitrogen content",
            ]),
        })
    }

    async fn interventions(
        &self,
        field: &FieldQuery,
        stress_type: Option<&str>,
        severity: Option<&str>,
    ) -> Result<InterventionPlan> {
        Ok(InterventionPlan {
            field_id: field.field_id.clone(),
            stress_type: stress_type.map(str::to_string),
            severity: severity.map(str::to_string),
            immediate_actions: vec![
                InterventionAction {
                    priority: "high".to_string(),
                    action: "Increase irrigation frequency".to_string(),
                    schedule: Some("Start within 24 hours".to_string()),
                    expected_impact: Some("Reduce water stress by 60% in 3 days".to_string()),
                    dosage: None,
                    method: None,
                    timing: None,
                },
                InterventionAction {
                    priority: "medium".to_string(),
                    action: "Apply nitrogen fertilizer".to_string(),
                    schedule: None,
                    expected_impact: None,
                    dosage: Some("25kg/hectare".to_string()),
                    method: Some("Broadcasting".to_string()),
                    timing: Some("Within 1 week".to_string()),
                },
            ],
            long_term_recommendations: strings(&[
                "Install drip irrigation system",
                "Implement mulching practices",
                "Consider drought-resistant crop varieties for next season",
            ]),
            estimated_cost: CostEstimate {
                immediate: "₹5,000 - ₹8,000".to_string(),
                long_term: "₹50,000 - ₹1,00,000".to_string(),
            },
        })
    }

    fn services(&self) -> Vec<ServiceDescriptor> {
        vec![
            ServiceDescriptor {
                id: "crop_analysis",
                name: "Crop Health Analysis",
                description: "NDVI/MLVI based crop stress detection",
                capabilities: vec!["ndvi_calculation", "stress_mapping", "heatmap_generation"],
            },
            ServiceDescriptor {
                id: "stress_detection",
                name: "Stress Detection",
                description: "Identify crop stress levels and causes",
                capabilities: vec!["water_stress", "nutrient_deficiency", "pest_damage"],
            },
            ServiceDescriptor {
                id: "weather_forecast",
                name: "Weather Forecast",
                description: "Real-time weather predictions",
                capabilities: vec!["7day_forecast", "rainfall_alerts", "temperature_trends"],
            },
            ServiceDescriptor {
                id: "soil_analysis",
                name: "Soil Health Analysis",
                description: "Soil moisture, nutrients, and pH monitoring",
                capabilities: vec!["moisture_tracking", "nutrient_analysis", "ph_monitoring"],
            },
            ServiceDescriptor {
                id: "intervention",
                name: "Smart Interventions",
                description: "AI-powered farming recommendations",
                capabilities: vec![
                    "irrigation_scheduling",
                    "fertilizer_recommendations",
                    "pest_control",
                ],
            },
            ServiceDescriptor {
                id: "yield_prediction",
                name: "Yield Prediction",
                description: "Forecast crop yield based on multiple factors",
                capabilities: vec!["seasonal_forecasting", "risk_assessment", "market_planning"],
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insights() -> PlaceholderInsights {
        PlaceholderInsights::new().with_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
    }

    #[tokio::test]
    async fn test_chat_text_by_service_type() {
        let insights = insights();

        let reply = insights.chat("wheat", None).await.unwrap();
        assert!(reply.text.contains("\"wheat\""));
        assert_eq!(reply.confidence, 0.85);
        assert_eq!(reply.related_services.len(), 3);

        let reply = insights.chat("wheat", Some("soil")).await.unwrap();
        assert!(reply.text.starts_with("Soil moisture is at 45%"));

        let reply = insights.chat("wheat", Some("unknown_type")).await.unwrap();
        assert!(reply.text.contains("\"wheat\""));
    }

    #[tokio::test]
    async fn test_forecast_is_deterministic() {
        let insights = insights();
        let first = insights.forecast_weather(Some(28.6), Some(77.2), None).await.unwrap();
        let second = insights.forecast_weather(Some(28.6), Some(77.2), None).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.forecast.len(), DEFAULT_FORECAST_DAYS);
        assert_eq!(first.forecast[0].date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(first.forecast[6].date, NaiveDate::from_ymd_opt(2024, 6, 7).unwrap());
        assert_eq!(first.forecast[3].condition, "rainy");
        assert_eq!(first.forecast[3].rainfall, 12);
        assert_eq!(first.forecast[0].rainfall, 0);
        assert!(first.forecast.iter().all(|d| (60..80).contains(&d.humidity)));
    }

    #[tokio::test]
    async fn test_forecast_days_are_clamped() {
        let report = insights().forecast_weather(None, None, Some(100)).await.unwrap();
        assert_eq!(report.forecast.len(), MAX_FORECAST_DAYS);

        let report = insights().forecast_weather(None, None, Some(0)).await.unwrap();
        assert!(report.forecast.is_empty());
    }

    #[tokio::test]
    async fn test_crop_heatmap_url() {
        let field = FieldQuery { field_id: Some("land-7".to_string()), coordinates: None };
        let analysis = insights().analyze_crop(&field).await.unwrap();
        assert_eq!(analysis.heatmap_url, "/api/heatmaps/land-7");

        let analysis = insights().analyze_crop(&FieldQuery::default()).await.unwrap();
        assert_eq!(analysis.heatmap_url, "/api/heatmaps/unknown");
    }

    #[test]
    fn test_services_catalogue() {
        let services = insights().services();
        assert_eq!(services.len(), 6);
        assert!(services.iter().any(|s| s.id == "yield_prediction"));
    }

    #[tokio::test]
    async fn test_intervention_wire_format() {
        let plan = insights().interventions(&FieldQuery::default(), Some("water"), None).await;
        let json = serde_json::to_value(plan.unwrap()).unwrap();

        assert_eq!(json["stressType"], "water");
        assert!(json.get("severity").is_none());
        assert_eq!(json["immediateActions"][1]["dosage"], "25kg/hectare");
        assert!(json["immediateActions"][0].get("dosage").is_none());
        assert_eq!(json["estimatedCost"]["longTerm"], "₹50,000 - ₹1,00,000");
    }
}
