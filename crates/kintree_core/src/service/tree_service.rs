//! Family tree use-case service.
//!
//! # Responsibility
//! - Load a snapshot from a `SnapshotSource` and run core computations on it.
//! - Apply `CoreConfig` limits for dashboard queries.
//!
//! # Invariants
//! - Each call reads a fresh snapshot; nothing is cached between calls.
//! - Only snapshot loading can fail; computations never do.

use crate::config::CoreConfig;
use crate::model::person::Person;
use crate::service::dashboard::{
    self, CalendarStats, DashboardSummary, MonthBirthday, UpcomingBirthday,
};
use crate::snapshot::{SnapshotResult, SnapshotSource};
use crate::tree::{resolve_as_of, FamilyIndex, MemberDetail, TreeLayout};
use chrono::NaiveDate;
use log::info;

/// Family tree service facade.
pub struct FamilyTreeService<S: SnapshotSource> {
    source: S,
    config: CoreConfig,
}

impl<S: SnapshotSource> FamilyTreeService<S> {
    /// Creates a service with default configuration.
    pub fn new(source: S) -> Self {
        Self::with_config(source, CoreConfig::default())
    }

    pub fn with_config(source: S, config: CoreConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Resolves the generation layout for the current snapshot.
    pub fn tree(&self, today: NaiveDate) -> SnapshotResult<TreeLayout> {
        let people = self.source.snapshot()?;
        let layout = resolve_as_of(&people, today);
        info!(
            "event=tree_build module=service status=ok members={} generations={} anchored={}",
            layout.stats.total_members,
            layout.stats.total_generations,
            layout.anchor_id.is_some()
        );
        Ok(layout)
    }

    /// Detail view for one member; `Ok(None)` when the id is not in the snapshot.
    pub fn member_detail(&self, id: &str, today: NaiveDate) -> SnapshotResult<Option<MemberDetail>> {
        let people = self.source.snapshot()?;
        let detail = FamilyIndex::build(&people).member_detail(id, today);
        if detail.is_none() {
            info!("event=member_detail module=service status=not_found id={id}");
        }
        Ok(detail)
    }

    /// Stat-card counters for the home dashboard.
    pub fn dashboard(&self, today: NaiveDate) -> SnapshotResult<DashboardSummary> {
        let people = self.source.snapshot()?;
        Ok(dashboard::summarize(
            &people,
            today,
            self.config.upcoming_window_days,
        ))
    }

    /// Upcoming birthdays within the configured window and limit.
    pub fn upcoming_birthdays(&self, today: NaiveDate) -> SnapshotResult<Vec<UpcomingBirthday>> {
        let people = self.source.snapshot()?;
        Ok(dashboard::upcoming_birthdays(
            &people,
            today,
            self.config.upcoming_window_days,
            self.config.upcoming_limit,
        ))
    }

    /// Birthdays in one calendar month.
    pub fn birthdays_in_month(
        &self,
        month: u32,
        today: NaiveDate,
    ) -> SnapshotResult<Vec<MonthBirthday>> {
        let people = self.source.snapshot()?;
        Ok(dashboard::birthdays_in_month(&people, month, today))
    }

    /// Stats card for the birthday calendar, using the configured window.
    pub fn calendar_stats(&self, today: NaiveDate) -> SnapshotResult<CalendarStats> {
        let people = self.source.snapshot()?;
        Ok(dashboard::calendar_stats(
            &people,
            today,
            self.config.upcoming_window_days,
        ))
    }

    /// Most recently added members, up to the configured limit.
    pub fn recently_added(&self) -> SnapshotResult<Vec<Person>> {
        let people = self.source.snapshot()?;
        Ok(dashboard::recently_added(&people, self.config.recent_limit)
            .into_iter()
            .cloned()
            .collect())
    }
}
