//! Sink abstraction and batch writing

use tracing::{debug, info};

use super::point::SinkPoint;
use crate::Result;
use crate::app::models::Transaction;

/// Destination for transaction points
pub trait TransactionSink {
    /// Write one point
    fn write_point(&mut self, point: &SinkPoint) -> Result<()>;

    /// Flush buffered points
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Write one point per transaction, stopping at the first failure
///
/// Returns the number of points written. Points written before a failure
/// are not rolled back.
pub fn write_all<S>(sink: &mut S, transactions: &[Transaction]) -> Result<usize>
where
    S: TransactionSink + ?Sized,
{
    for (index, transaction) in transactions.iter().enumerate() {
        let point = SinkPoint::from_transaction(transaction);
        if let Err(e) = sink.write_point(&point) {
            debug!(
                "Sink write failed at point {} ({}): {}",
                index, transaction.tx_uid, e
            );
            return Err(e);
        }
    }

    sink.flush()?;
    info!("Wrote {} points to sink", transactions.len());

    Ok(transactions.len())
}
