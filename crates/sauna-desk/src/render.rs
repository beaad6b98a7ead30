//! Plain-text rendering for the terminal

use chrono::{DateTime, Local};
use sauna_api::{
    CheckoutReceipt, Customer, DailyOverview, LockerView, PackageSale, PackageSummary,
    PaymentMethod, Report, UsageRecord,
};
use sauna_core::ImportOutcome;
use sauna_util::{format_clock_time, format_date, format_datetime_full, format_stay};
use std::fmt::Write;

pub fn checked_in(customer: &Customer) -> String {
    let mut out = format!(
        "Checked in customer {} to locker {} at {}\n",
        customer.id,
        customer.locker_number,
        format_clock_time(&customer.check_in_time)
    );
    match customer.payment {
        PaymentMethod::Cash => {
            let _ = writeln!(
                out,
                "  {} admission, cash {}",
                customer.ticket_type,
                customer.cash_amount.unwrap_or(0)
            );
        }
        PaymentMethod::Ticket => {
            let ticket = customer
                .ticket_number
                .as_ref()
                .map_or("(none)", |t| t.as_str());
            let _ = writeln!(out, "  {} admission, ticket {}", customer.ticket_type, ticket);
        }
    }
    out
}

pub fn receipt(receipt: &CheckoutReceipt, customer: Option<&Customer>) -> String {
    let mut out = format!(
        "Customer {} checked out, locker {} is free\n",
        receipt.customer_id, receipt.locker_number
    );
    if let Some(customer) = customer {
        let stay = customer.stay(receipt.check_out_time);
        let _ = writeln!(out, "  Stay:        {}", format_stay(stay));
    }
    let _ = writeln!(out, "  Expenses:    {}", receipt.bill.total_expenses);
    let _ = writeln!(out, "  Overtime:    {}", receipt.bill.overtime_charge);
    let _ = writeln!(out, "  Final bill:  {}", receipt.bill.final_bill);

    if let Some(package) = &receipt.package {
        if package.overconsumed {
            let _ = writeln!(
                out,
                "  Package {} had no uses left (counter stays at 0)",
                package.package_id
            );
        } else {
            let _ = writeln!(
                out,
                "  Package {}: {} uses left",
                package.package_id, package.remaining
            );
        }
    }
    out
}

pub fn package_sold(sale: &PackageSale) -> String {
    format!(
        "Sold package {} to {}: {} admissions for {}\n  Tickets: {}\n",
        sale.id, sale.customer_name, sale.quantity, sale.amount, sale.ticket_numbers
    )
}

pub fn active(customers: &[&Customer], now: DateTime<Local>) -> String {
    if customers.is_empty() {
        return "No customers on site\n".to_string();
    }

    let mut out = format!(
        "{:>6}  {:>15}  {:<16} {:<8} {:<7} {:>8}\n",
        "Locker", "Id", "Name", "Type", "In", "Stay"
    );
    for c in customers {
        let _ = writeln!(
            out,
            "{:>6}  {:>15}  {:<16} {:<8} {:<7} {:>8}",
            c.locker_number.get(),
            c.id.as_i64(),
            c.customer_name,
            c.ticket_type.label(),
            format_clock_time(&c.check_in_time),
            format_stay(c.stay(now))
        );
    }
    out
}

pub fn lockers(views: &[LockerView]) -> String {
    let free = views.iter().filter(|v| v.is_free()).count();
    let mut out = format!("{} of {} lockers free\n", free, views.len());

    for row in views.chunks(10) {
        let cells: Vec<String> = row
            .iter()
            .map(|v| {
                let mark = if v.is_free() { ' ' } else { '#' };
                format!("[{:>3}{}]", v.number.get(), mark)
            })
            .collect();
        let _ = writeln!(out, "{}", cells.join(" "));
    }
    out
}

pub fn packages(summaries: &[PackageSummary]) -> String {
    if summaries.is_empty() {
        return "No packages sold\n".to_string();
    }

    let mut out = format!(
        "{:>15}  {:<10} {:<16} {:>8} {:>5} {:>5} {:>5}  {}\n",
        "Id", "Sold", "Buyer", "Amount", "Qty", "Used", "Left", "Tickets"
    );
    for s in summaries {
        let sale = &s.sale;
        let _ = writeln!(
            out,
            "{:>15}  {:<10} {:<16} {:>8} {:>5} {:>5} {:>5}  {}",
            sale.id.as_i64(),
            format_date(sale.sale_date.date_naive()),
            sale.customer_name,
            sale.amount,
            sale.quantity,
            s.used,
            sale.remaining,
            sale.ticket_numbers
        );
    }
    out
}

pub fn usage(history: &[UsageRecord]) -> String {
    if history.is_empty() {
        return "No usage recorded\n".to_string();
    }

    let mut out = String::new();
    for record in history {
        let _ = writeln!(
            out,
            "{}  {:<16} ticket {}",
            format_datetime_full(&record.check_in_time),
            record.customer_name,
            record.ticket_number
        );
    }
    out
}

pub fn report(report: &Report) -> String {
    let mut out = format!(
        "Sales report {} to {}\n\n",
        format_date(report.start),
        format_date(report.end)
    );

    let _ = writeln!(
        out,
        "{:<10}  {:>10} {:>10} {:>8} {:>9}",
        "Date", "Cash", "Overtime", "Tickets", "Visitors"
    );
    for day in &report.daily {
        let _ = writeln!(
            out,
            "{:<10}  {:>10} {:>10} {:>8} {:>9}",
            format_date(day.date),
            day.cash_income,
            day.overtime_income,
            day.ticket_usage,
            day.customer_count
        );
    }

    let t = &report.totals;
    let _ = writeln!(out);
    let _ = writeln!(out, "Cash income:      {}", t.cash_income);
    let _ = writeln!(out, "Package income:   {}", t.package_income);
    let _ = writeln!(out, "Overtime income:  {}", t.overtime_income);
    let _ = writeln!(out, "Total revenue:    {}", t.total_revenue());
    let _ = writeln!(out, "Visitors:         {}", t.customer_count);
    let _ = writeln!(out, "Ticket visits:    {}", t.ticket_usage_count);
    let _ = writeln!(out, "Tickets sold:     {}", t.package_sale_count);
    out
}

pub fn overview(overview: &DailyOverview) -> String {
    format!(
        "Today ({})\n  Cash income:      {}\n  Package income:   {}\n  Overtime income:  {}\n  Total revenue:    {}\n  Visitors:         {}\n",
        format_date(overview.date),
        overview.cash_income,
        overview.package_income,
        overview.overtime_income,
        overview.total_revenue(),
        overview.customer_count
    )
}

pub fn imported(outcome: &ImportOutcome) -> String {
    let describe = |n: Option<usize>| n.map_or("kept".to_string(), |n| format!("replaced ({n})"));
    format!(
        "Import complete\n  Customers:  {}\n  Packages:   {}\n  Lockers:    {}\n",
        describe(outcome.customers),
        describe(outcome.package_sales),
        describe(outcome.lockers)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sauna_util::{CustomerId, LockerNumber};

    #[test]
    fn locker_grid_marks_occupied() {
        let views: Vec<LockerView> = (0..12)
            .map(|i| LockerView {
                number: LockerNumber::from_index(i),
                occupant: (i == 2).then(|| CustomerId::new(5)),
            })
            .collect();

        let text = lockers(&views);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "11 of 12 lockers free");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("[  3#]"));
        assert!(lines[2].starts_with("[ 11 ]"));
    }

    #[test]
    fn import_summary_names_kept_collections() {
        let text = imported(&ImportOutcome {
            customers: Some(4),
            package_sales: None,
            lockers: Some(50),
        });
        assert!(text.contains("Customers:  replaced (4)"));
        assert!(text.contains("Packages:   kept"));
    }
}
