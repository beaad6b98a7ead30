//! Revenue and attendance summaries

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::Amount;

/// Figures for one calendar day of visits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub date: NaiveDate,
    pub cash_income: Amount,
    pub overtime_income: Amount,
    pub ticket_usage: u64,
    pub customer_count: u64,
}

impl DaySummary {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            cash_income: 0,
            overtime_income: 0,
            ticket_usage: 0,
            customer_count: 0,
        }
    }
}

/// Totals over a whole report range
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTotals {
    pub cash_income: Amount,
    pub package_income: Amount,
    pub overtime_income: Amount,
    pub customer_count: u64,
    pub ticket_usage_count: u64,
    /// Tickets sold in packages (sum of quantities)
    pub package_sale_count: u64,
}

impl ReportTotals {
    pub fn total_revenue(&self) -> Amount {
        self.cash_income + self.package_income + self.overtime_income
    }
}

/// Sales report over an inclusive range of days
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Days with at least one visit, ascending
    pub daily: Vec<DaySummary>,
    pub totals: ReportTotals,
}

/// "Today at a glance" figures for a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyOverview {
    pub date: NaiveDate,
    /// Cash taken from visits that checked in this day
    pub cash_income: Amount,
    /// Packages sold this day
    pub package_income: Amount,
    /// Overtime billed at checkouts completed this day
    pub overtime_income: Amount,
    /// Visits that checked in this day
    pub customer_count: u64,
}

impl DailyOverview {
    pub fn total_revenue(&self) -> Amount {
        self.cash_income + self.package_income + self.overtime_income
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_revenue_sums_income_streams() {
        let totals = ReportTotals {
            cash_income: 1000,
            package_income: 1200,
            overtime_income: 300,
            customer_count: 4,
            ticket_usage_count: 2,
            package_sale_count: 3,
        };
        assert_eq!(totals.total_revenue(), 2500);
    }

    #[test]
    fn day_summary_serializes_plain_date() {
        let day = DaySummary::empty(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        let json = serde_json::to_value(day).unwrap();
        assert_eq!(json["date"], "2025-03-01");
        assert_eq!(json["customerCount"], 0);
    }
}
