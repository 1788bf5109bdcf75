//! Transaction assembly from mapped fields and caller context

use super::identity::{Fingerprint, FingerprintInput, recorded_at};
use super::row_mapper::MappedRow;
use crate::Result;
use crate::app::models::{Direction, ImportContext, Transaction};
use crate::app::services::field_normalizers::CalendarContext;
use crate::constants::PLACEHOLDER_CATEGORY;

/// Stamp context onto mapped fields and derive direction and identity
pub fn assemble_transaction(
    mapped: MappedRow,
    context: &ImportContext,
    calendar: &CalendarContext,
) -> Result<Transaction> {
    let fingerprint = Fingerprint::of(&FingerprintInput {
        account_id: &context.account_id,
        booking_date: mapped.booking_date,
        amount_cents: mapped.amount_cents,
        currency: &mapped.currency,
        payee: &mapped.payee,
        memo: &mapped.memo,
        reference: &mapped.reference,
    });

    let midnight = calendar.midnight(mapped.booking_date)?;
    let recorded_at = recorded_at(midnight, fingerprint.day_offset())?;

    Ok(Transaction {
        tenant_id: context.tenant_id.clone(),
        account_id: context.account_id.clone(),
        bank_id: context.bank_id.clone(),
        booking_date: mapped.booking_date,
        value_date: mapped.value_date,
        amount_cents: mapped.amount_cents,
        currency: mapped.currency,
        direction: Direction::from_amount(mapped.amount_cents),
        payee: mapped.payee,
        memo: mapped.memo,
        reference: mapped.reference,
        iban: mapped.iban,
        category_id: PLACEHOLDER_CATEGORY.to_string(),
        tx_uid: fingerprint.hex(),
        recorded_at,
    })
}
