//! Receipt

use std::io;

use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    display::{DisplayItem, LinePricing},
    totals::Totals,
};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error
    #[error("Failed to write receipt: {0}")]
    Io(#[from] io::Error),
}

/// Writes resolved lines and their totals as a table followed by a summary block.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_to(
    mut out: impl io::Write,
    items: &[DisplayItem<'_>],
    totals: &Totals<'_>,
) -> Result<(), ReceiptError> {
    let mut builder = Builder::default();

    builder.push_record([
        "Item",
        "Qty",
        "Unit Price",
        "Promotion",
        "Voucher",
        "Final Price",
        "Line Total",
        "Pricing",
    ]);

    for item in items {
        builder.push_record([
            item_label(item),
            item.quantity.to_string(),
            item.original_price.to_string(),
            discount_cell(item.promotion_discount),
            discount_cell(item.voucher_discount),
            item.final_price.to_string(),
            item.line_total().to_string(),
            pricing_label(item.pricing).to_string(),
        ]);
    }

    write_table(&mut out, builder)?;
    write_summary(&mut out, totals)
}

fn item_label(item: &DisplayItem<'_>) -> String {
    if item.gift {
        format!("{} (gift)", item.product)
    } else {
        item.product.to_string()
    }
}

fn discount_cell(discount: Money<'_, Currency>) -> String {
    if discount.to_minor_units() == 0 {
        String::new()
    } else {
        format!("-{discount}")
    }
}

fn pricing_label(pricing: LinePricing) -> &'static str {
    match pricing {
        LinePricing::Regular => "",
        LinePricing::OrderLevelVoucher => "order voucher",
        LinePricing::LineVoucher => "line voucher",
    }
}

fn write_table(out: &mut impl io::Write, builder: Builder) -> Result<(), ReceiptError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(
        1,
        HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
    );

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(1..7), Alignment::right());

    writeln!(out, "\n{table}")?;

    Ok(())
}

fn write_summary(out: &mut impl io::Write, totals: &Totals<'_>) -> Result<(), ReceiptError> {
    let lines = [
        ("Subtotal:", totals.subtotal_before_discount.to_string()),
        ("Promotions:", discount_cell(totals.promotion_discount)),
        ("Voucher:", discount_cell(totals.voucher_discount)),
        ("Total:", totals.final_total.to_string()),
        ("Savings:", totals.savings().to_string()),
    ];

    let label_width = lines.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let value_width = lines.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

    for (label, value) in &lines {
        writeln!(out, " {label:>label_width$}  {value:>value_width$}")?;
    }

    writeln!(out)?;

    Ok(())
}
