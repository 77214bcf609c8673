//! Device status lifecycle and offline-duration accounting.
//!
//! A device is *up* while `online` or `warning` and *down* while `offline`
//! or `offline_ack`. The outage clock starts on the first down observation
//! after being up, and is cleared as soon as the device answers again.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::duration::format_offline_duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceStatus {
    Online,
    Warning,
    Offline,
    OfflineAck,
    #[default]
    Unknown,
}

impl DeviceStatus {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "online" | "up" => Some(Self::Online),
            "warning" => Some(Self::Warning),
            "offline" | "down" => Some(Self::Offline),
            "offline_ack" => Some(Self::OfflineAck),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Warning => "warning",
            Self::Offline => "offline",
            Self::OfflineAck => "offline_ack",
            Self::Unknown => "unknown",
        }
    }

    pub fn is_up(&self) -> bool {
        matches!(self, Self::Online | Self::Warning)
    }

    pub fn is_down(&self) -> bool {
        matches!(self, Self::Offline | Self::OfflineAck)
    }
}

/// Thresholds that turn raw observations into statuses and alerts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertPolicy {
    /// Whole minutes a device must stay down before an alert is raised
    pub offline_threshold_minutes: i64,
    /// Replies slower than this (milliseconds) mark the device `warning`
    pub response_time_threshold_ms: f64,
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self {
            offline_threshold_minutes: 2,
            response_time_threshold_ms: 1000.0,
        }
    }
}

impl AlertPolicy {
    /// Status for one ping result. A reply without a measured time counts
    /// as no reply.
    pub fn classify(&self, reachable: bool, response_time_ms: Option<f64>) -> DeviceStatus {
        match response_time_ms {
            Some(ms) if reachable && ms > self.response_time_threshold_ms => DeviceStatus::Warning,
            Some(_) if reachable => DeviceStatus::Online,
            _ => DeviceStatus::Offline,
        }
    }
}

/// Alert raised once per outage when a device stays down past the
/// threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfflineAlert {
    pub device: String,
    pub severity: String,
    pub category: String,
    pub title: String,
    pub message: String,
    pub downtime: String,
    pub offline_minutes: i64,
    pub triggered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StatusEvent {
    WentOffline {
        previous: DeviceStatus,
        at: DateTime<Utc>,
        /// Dropped straight from `online`
        critical: bool,
    },
    AlertRaised(OfflineAlert),
    CameOnline {
        at: DateTime<Utc>,
        offline_minutes: i64,
        downtime: String,
    },
}

/// Per-device outage bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfflineTracker {
    pub name: String,
    pub address: Option<String>,
    status: DeviceStatus,
    offline_since: Option<DateTime<Utc>>,
    online_since: Option<DateTime<Utc>>,
    offline_duration_minutes: i64,
    alert_sent: bool,
}

impl OfflineTracker {
    pub fn new(name: impl Into<String>, address: Option<String>) -> Self {
        Self {
            name: name.into(),
            address,
            status: DeviceStatus::Unknown,
            offline_since: None,
            online_since: None,
            offline_duration_minutes: 0,
            alert_sent: false,
        }
    }

    pub fn status(&self) -> DeviceStatus {
        self.status
    }

    pub fn offline_since(&self) -> Option<DateTime<Utc>> {
        self.offline_since
    }

    pub fn online_since(&self) -> Option<DateTime<Utc>> {
        self.online_since
    }

    pub fn offline_duration_minutes(&self) -> i64 {
        self.offline_duration_minutes
    }

    pub fn alert_sent(&self) -> bool {
        self.alert_sent
    }

    /// Formatted length of the current outage as of `now`.
    pub fn downtime(&self, now: DateTime<Utc>) -> String {
        let minutes = self
            .offline_since
            .map(|since| (now - since).num_seconds().max(0) as f64 / 60.0);
        format_offline_duration(minutes)
    }

    /// Feed one status observation taken at `now`.
    ///
    /// `Unknown` observations carry no information and are ignored.
    pub fn observe(
        &mut self,
        status: DeviceStatus,
        now: DateTime<Utc>,
        policy: &AlertPolicy,
    ) -> Vec<StatusEvent> {
        let mut events = Vec::new();
        let previous = self.status;

        if status == DeviceStatus::Unknown {
            return events;
        }

        if status.is_down() {
            if !previous.is_down() {
                self.offline_since = Some(now);
                self.online_since = None;
                self.offline_duration_minutes = 0;
                self.alert_sent = false;
                tracing::info!(
                    device = %self.name,
                    previous = previous.as_str(),
                    "device went offline"
                );
                events.push(StatusEvent::WentOffline {
                    previous,
                    at: now,
                    critical: previous == DeviceStatus::Online,
                });
            } else if let Some(since) = self.offline_since {
                self.offline_duration_minutes = (now - since).num_minutes().max(0);

                // Only a repeated down reading can alert, whatever the threshold
                if !self.alert_sent
                    && self.offline_duration_minutes >= policy.offline_threshold_minutes
                {
                    self.alert_sent = true;
                    let alert = self.build_alert(now);
                    tracing::warn!(
                        device = %self.name,
                        minutes = self.offline_duration_minutes,
                        "offline alert raised"
                    );
                    events.push(StatusEvent::AlertRaised(alert));
                }
            }

            // A fresh `offline` reading does not undo an acknowledgement
            self.status = if previous == DeviceStatus::OfflineAck {
                DeviceStatus::OfflineAck
            } else {
                status
            };
        } else {
            if previous.is_down() {
                let offline_minutes = self
                    .offline_since
                    .map_or(0, |since| (now - since).num_minutes().max(0));
                let downtime = self.downtime(now);
                tracing::info!(device = %self.name, %downtime, "device back online");
                events.push(StatusEvent::CameOnline {
                    at: now,
                    offline_minutes,
                    downtime,
                });
            }
            if !previous.is_up() {
                self.online_since = Some(now);
            }
            self.offline_since = None;
            self.offline_duration_minutes = 0;
            self.alert_sent = false;
            self.status = status;
        }

        events
    }

    /// Mark the current outage as seen by an operator. Only an `offline`
    /// device can be acknowledged; the outage clock keeps running.
    pub fn acknowledge(&mut self) -> bool {
        if self.status == DeviceStatus::Offline {
            self.status = DeviceStatus::OfflineAck;
            true
        } else {
            false
        }
    }

    /// The address is shown in parentheses after the name when known.
    fn build_alert(&self, now: DateTime<Utc>) -> OfflineAlert {
        let downtime = format_offline_duration(Some(self.offline_duration_minutes as f64));
        let subject = match &self.address {
            Some(address) => format!("{} ({})", self.name, address),
            None => self.name.clone(),
        };
        OfflineAlert {
            device: self.name.clone(),
            severity: "high".to_string(),
            category: "connectivity".to_string(),
            title: format!("Device Offline: {}", self.name),
            message: format!("Device {} has been offline for {}.", subject, downtime),
            downtime,
            offline_minutes: self.offline_duration_minutes,
            triggered_at: now,
        }
    }
}

/// Share of checks in `history` that found the device up, in percent.
/// Without history the current status decides: 100 when up, else 0.
pub fn uptime_percentage(history: &[DeviceStatus], current: DeviceStatus) -> f64 {
    share(history, current, DeviceStatus::is_up)
}

/// Share of checks in `history` that found the device down, in percent.
pub fn downtime_percentage(history: &[DeviceStatus], current: DeviceStatus) -> f64 {
    share(history, current, DeviceStatus::is_down)
}

fn share(history: &[DeviceStatus], current: DeviceStatus, pred: fn(&DeviceStatus) -> bool) -> f64 {
    if history.is_empty() {
        return if pred(&current) { 100.0 } else { 0.0 };
    }
    let hits = history.iter().filter(|s| pred(s)).count();
    hits as f64 / history.len() as f64 * 100.0
}
