//! Sales report aggregation

use chrono::NaiveDate;
use sauna_api::{
    Customer, DailyOverview, DaySummary, PackageSale, PaymentMethod, Report, ReportTotals,
};
use std::collections::BTreeMap;

/// Revenue report over the local days `start..=end`.
///
/// Visits are grouped by check-in day; package sales count towards the
/// totals only. An inverted range yields an empty report.
pub fn report(
    customers: &[Customer],
    packages: &[PackageSale],
    start: NaiveDate,
    end: NaiveDate,
) -> Report {
    let mut days: BTreeMap<NaiveDate, DaySummary> = BTreeMap::new();

    for customer in customers
        .iter()
        .filter(|c| sauna_util::within_days(&c.check_in_time, start, end))
    {
        let date = customer.check_in_time.date_naive();
        let day = days.entry(date).or_insert_with(|| DaySummary::empty(date));

        day.cash_income += customer.cash_income();
        day.overtime_income += customer.overtime_charge.unwrap_or(0);
        if customer.payment == PaymentMethod::Ticket {
            day.ticket_usage += 1;
        }
        day.customer_count += 1;
    }

    let mut totals = ReportTotals::default();
    for day in days.values() {
        totals.cash_income += day.cash_income;
        totals.overtime_income += day.overtime_income;
        totals.ticket_usage_count += day.ticket_usage;
        totals.customer_count += day.customer_count;
    }
    for sale in packages
        .iter()
        .filter(|p| sauna_util::within_days(&p.sale_date, start, end))
    {
        totals.package_income += sale.amount;
        totals.package_sale_count += u64::from(sale.quantity);
    }

    Report {
        start,
        end,
        daily: days.into_values().collect(),
        totals,
    }
}

/// Figures for a single day: visits by check-in, packages by sale date,
/// overtime by checkout
pub fn daily_overview(
    customers: &[Customer],
    packages: &[PackageSale],
    date: NaiveDate,
) -> DailyOverview {
    let on_day = |dt: &chrono::DateTime<chrono::Local>| dt.date_naive() == date;

    let checked_in: Vec<&Customer> = customers
        .iter()
        .filter(|c| on_day(&c.check_in_time))
        .collect();

    DailyOverview {
        date,
        cash_income: checked_in.iter().map(|c| c.cash_income()).sum(),
        package_income: packages
            .iter()
            .filter(|p| on_day(&p.sale_date))
            .map(|p| p.amount)
            .sum(),
        overtime_income: customers
            .iter()
            .filter(|c| c.check_out_time.as_ref().is_some_and(on_day))
            .map(|c| c.overtime_charge.unwrap_or(0))
            .sum(),
        customer_count: checked_in.len() as u64,
    }
}
