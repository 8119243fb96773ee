//! Alert Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Alert severity, ordered from least to most urgent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Moderate,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Info,
        Severity::Moderate,
        Severity::High,
        Severity::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Moderate => "moderate",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    /// Whether alerts of this severity get a push notification
    pub fn is_urgent(&self) -> bool {
        matches!(self, Severity::High | Severity::Critical)
    }

    /// Icon hint handed to the notification channel
    pub fn icon(&self) -> &'static str {
        match self {
            Severity::Critical => "🚨",
            Severity::High => "⚠️",
            Severity::Moderate => "⚡",
            Severity::Info => "💡",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown severity name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown severity: {0}")]
pub struct ParseSeverityError(pub String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "moderate" => Ok(Severity::Moderate),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}

/// Source of an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    HeartRate,
    Hrv,
    Sleep,
    Spo2,
    BloodPressure,
    Composite,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::HeartRate => "heart_rate",
            AlertType::Hrv => "hrv",
            AlertType::Sleep => "sleep",
            AlertType::Spo2 => "spo2",
            AlertType::BloodPressure => "blood_pressure",
            AlertType::Composite => "composite",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A health alert as stored and persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub severity: Severity,
    pub title: String,
    pub message: String,
    /// Contextual values (thresholds, measurements); not interpreted by the store
    #[serde(default)]
    pub data: Value,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub acknowledged: bool,
    #[serde(default)]
    pub dismissed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acknowledged_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dismissed_at: Option<DateTime<Utc>>,
}

impl Alert {
    pub(crate) fn new(request: AlertRequest, created_at: DateTime<Utc>) -> Self {
        Self {
            id: generate_id(created_at),
            alert_type: request.alert_type,
            severity: request.severity,
            title: request.title,
            message: request.message,
            data: request.data,
            created_at,
            acknowledged: false,
            dismissed: false,
            acknowledged_at: None,
            dismissed_at: None,
        }
    }

    /// Mark acknowledged. The first acknowledgement time is kept.
    pub(crate) fn acknowledge(&mut self, now: DateTime<Utc>) {
        if !self.acknowledged {
            self.acknowledged = true;
            self.acknowledged_at = Some(now);
        }
    }

    /// Mark dismissed. The first dismissal time is kept.
    pub(crate) fn dismiss(&mut self, now: DateTime<Utc>) {
        if !self.dismissed {
            self.dismissed = true;
            self.dismissed_at = Some(now);
        }
    }
}

/// Everything needed to create an alert, minus identity and timestamps
#[derive(Debug, Clone, PartialEq)]
pub struct AlertRequest {
    pub alert_type: AlertType,
    pub severity: Severity,
    pub title: String,
    pub message: String,
    pub data: Value,
}

impl AlertRequest {
    pub fn new(
        alert_type: AlertType,
        severity: Severity,
        title: impl Into<String>,
        message: impl Into<String>,
        data: Value,
    ) -> Self {
        Self {
            alert_type,
            severity,
            title: title.into(),
            message: message.into(),
            data,
        }
    }
}

/// Millisecond timestamp plus a random suffix, unique within the same millisecond.
pub(crate) fn generate_id(now: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("alert_{}_{}", now.timestamp_millis(), &suffix[..9])
}
