// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Report assembly over the read projections.
//!
//! Reports are thin: each one gates on the reporting capability, reads the
//! source collections, and reshapes a projection into a response DTO.

use crate::auth::SessionContext;
use crate::error::ApiError;
use helpdesk::{
    AgentWorkload, StatusCounts, agent_workloads, category_counts, daily_volume, monthly_volume,
    overdue_count, status_counts,
};
use helpdesk_domain::{Ticket, average_resolution_time};
use helpdesk_persistence::RecordStore;
use time::{Date, OffsetDateTime};

/// Ticket counts by lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StatusReport {
    /// Tickets in `Open`.
    pub open: usize,
    /// Tickets in `In Progress`.
    pub in_progress: usize,
    /// Tickets in `Closed`.
    pub closed: usize,
    /// All tickets.
    pub total: usize,
}

/// One agent's workload row in the monitoring report.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AgentWorkloadInfo {
    /// The agent's user id.
    pub agent_id: i64,
    /// The agent's display name.
    pub agent_name: String,
    /// Assigned tickets in `Open`.
    pub open: usize,
    /// Assigned tickets in `In Progress`.
    pub in_progress: usize,
    /// Assigned tickets in `Closed`.
    pub closed: usize,
    /// All assigned tickets.
    pub total: usize,
    /// Closed over total, in `[0.0, 1.0]`.
    pub completion_rate: f64,
}

impl AgentWorkloadInfo {
    fn from_workload(workload: &AgentWorkload) -> Self {
        Self {
            agent_id: workload.agent_id,
            agent_name: workload.agent_name.clone(),
            open: workload.open,
            in_progress: workload.in_progress,
            closed: workload.closed,
            total: workload.total,
            completion_rate: workload.completion_rate,
        }
    }
}

/// Ticket count for one category.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CategoryCountInfo {
    /// The category name.
    pub category: String,
    /// Tickets filed under the category.
    pub count: usize,
}

/// Tickets created on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DailyVolumeInfo {
    /// The calendar day.
    pub date: Date,
    /// Tickets created that day.
    pub count: usize,
}

/// Tickets created in one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MonthlyVolumeInfo {
    /// The calendar year.
    pub year: i32,
    /// The calendar month, 1 through 12.
    pub month: u8,
    /// Tickets created that month.
    pub count: usize,
}

/// Daily and monthly creation volume.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VolumeReport {
    /// Per-day counts, ordered by date.
    pub daily: Vec<DailyVolumeInfo>,
    /// Per-month counts, ordered by month.
    pub monthly: Vec<MonthlyVolumeInfo>,
}

/// SLA overdue counts at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OverdueReport {
    /// Active tickets past their SLA budget.
    pub overdue: usize,
    /// All active (open or in-progress) tickets.
    pub active: usize,
}

/// Mean resolution time over closed tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ResolutionReport {
    /// The mean resolution time in whole seconds; zero with no closed
    /// tickets.
    pub average_seconds: i64,
    /// The number of closed tickets considered.
    pub closed: usize,
}

fn require_reporting(session: &SessionContext, report: &str) -> Result<(), ApiError> {
    if session.role.capabilities().can_view_reports.is_allowed() {
        return Ok(());
    }
    Err(ApiError::Unauthorized {
        action: format!("view the {report} report"),
        required_role: String::from("admin, superadmin, or executive"),
    })
}

/// Ticket counts by status.
///
/// # Errors
///
/// Returns an error if the session role may not view reports.
pub fn status_report(
    store: &dyn RecordStore,
    session: &SessionContext,
) -> Result<StatusReport, ApiError> {
    require_reporting(session, "status")?;
    let counts: StatusCounts = status_counts(&store.read_tickets());
    Ok(StatusReport {
        open: counts.open,
        in_progress: counts.in_progress,
        closed: counts.closed,
        total: counts.total(),
    })
}

/// Per-agent workload with completion rate.
///
/// # Errors
///
/// Returns an error if the session role may not view reports.
pub fn agent_workload_report(
    store: &dyn RecordStore,
    session: &SessionContext,
) -> Result<Vec<AgentWorkloadInfo>, ApiError> {
    require_reporting(session, "agent workload")?;
    Ok(agent_workloads(&store.read_tickets(), &store.read_users())
        .iter()
        .map(AgentWorkloadInfo::from_workload)
        .collect())
}

/// Ticket counts by category.
///
/// # Errors
///
/// Returns an error if the session role may not view reports.
pub fn category_report(
    store: &dyn RecordStore,
    session: &SessionContext,
) -> Result<Vec<CategoryCountInfo>, ApiError> {
    require_reporting(session, "category")?;
    Ok(category_counts(&store.read_tickets())
        .into_iter()
        .map(|count| CategoryCountInfo {
            category: count.category,
            count: count.count,
        })
        .collect())
}

/// Daily and monthly creation volume.
///
/// # Errors
///
/// Returns an error if the session role may not view reports.
pub fn volume_report(
    store: &dyn RecordStore,
    session: &SessionContext,
) -> Result<VolumeReport, ApiError> {
    require_reporting(session, "volume")?;
    let tickets: Vec<Ticket> = store.read_tickets();
    Ok(VolumeReport {
        daily: daily_volume(&tickets)
            .into_iter()
            .map(|(date, count)| DailyVolumeInfo { date, count })
            .collect(),
        monthly: monthly_volume(&tickets)
            .into_iter()
            .map(|((year, month), count)| MonthlyVolumeInfo { year, month, count })
            .collect(),
    })
}

/// Overdue counts against the SLA policy at `now`.
///
/// # Errors
///
/// Returns an error if the session role may not view reports.
pub fn overdue_report(
    store: &dyn RecordStore,
    session: &SessionContext,
    now: OffsetDateTime,
) -> Result<OverdueReport, ApiError> {
    require_reporting(session, "overdue")?;
    let tickets: Vec<Ticket> = store.read_tickets();
    Ok(OverdueReport {
        overdue: overdue_count(&tickets, now),
        active: tickets
            .iter()
            .filter(|ticket| ticket.status.is_active())
            .count(),
    })
}

/// Mean resolution time over closed tickets.
///
/// # Errors
///
/// Returns an error if the session role may not view reports.
pub fn resolution_report(
    store: &dyn RecordStore,
    session: &SessionContext,
) -> Result<ResolutionReport, ApiError> {
    require_reporting(session, "resolution")?;
    let tickets: Vec<Ticket> = store.read_tickets();
    Ok(ResolutionReport {
        average_seconds: average_resolution_time(&tickets).whole_seconds(),
        closed: tickets
            .iter()
            .filter(|ticket| !ticket.status.is_active())
            .count(),
    })
}
