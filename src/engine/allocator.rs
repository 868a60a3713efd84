//! Oldest-debt-first allocation of payments to earnings.

use super::{CoveredEvent, Earning};
use crate::domain::ordering::sort_payments_for_allocation;
use crate::domain::{LedgerOrderingKey, Money, Payment};

/// A payment annotated with the earnings it settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocatedPayment {
    pub payment: Payment,
    pub covered_events: Vec<CoveredEvent>,
}

impl AllocatedPayment {
    pub fn covered_total(&self) -> Money {
        self.covered_events.iter().map(|c| c.covered_amount).sum()
    }
}

/// Output of one allocation run for one staff member.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Allocation {
    /// Earnings oldest first, with final `remaining` values.
    pub earnings: Vec<Earning>,
    /// Payments oldest first.
    pub payments: Vec<AllocatedPayment>,
}

/// Greedy FIFO allocator.
///
/// Holds one staff member's earnings queue, oldest first. Each payment walks
/// the queue from the front and drains whatever is outstanding until the
/// payment is exhausted. A surplus left after the queue is empty is
/// discarded; it shows up only as a negative balance.
pub struct FifoAllocator {
    queue: Vec<Earning>,

    // Outputs accumulated during processing.
    payments: Vec<AllocatedPayment>,
}

impl FifoAllocator {
    /// Build the queue. Earnings are sorted by (date, event id) and their
    /// `remaining` reset to the full amount.
    pub fn new(mut earnings: Vec<Earning>) -> Self {
        earnings.sort_by(|a, b| {
            let key_a = LedgerOrderingKey::new(a.date, a.id.as_str());
            let key_b = LedgerOrderingKey::new(b.date, b.id.as_str());
            key_a.cmp(&key_b)
        });
        for earning in &mut earnings {
            earning.remaining = earning.amount;
        }

        Self {
            queue: earnings,
            payments: Vec::new(),
        }
    }

    /// Allocate a single payment against the queue.
    ///
    /// Callers must feed payments oldest first for the result to be FIFO.
    pub fn process_payment(&mut self, payment: &Payment) {
        let mut payment_remaining = payment.amount;
        let mut covered_events = Vec::new();

        for earning in self.queue.iter_mut() {
            if !payment_remaining.is_positive() {
                break;
            }
            if earning.is_settled() {
                continue;
            }

            let allocation = payment_remaining.min(earning.remaining);
            earning.remaining -= allocation;
            payment_remaining -= allocation;

            if allocation.is_positive() {
                covered_events.push(CoveredEvent {
                    earning_id: earning.id.clone(),
                    title: earning.title.clone(),
                    date: earning.date,
                    total_amount: earning.amount,
                    covered_amount: allocation,
                });
            }
        }

        if payment_remaining.is_positive() {
            tracing::debug!(
                payment_id = %payment.id,
                surplus = %payment_remaining,
                "Payment exceeds outstanding earnings"
            );
        }

        self.payments.push(AllocatedPayment {
            payment: payment.clone(),
            covered_events,
        });
    }

    /// Total still owed across the queue.
    pub fn outstanding(&self) -> Money {
        self.queue.iter().map(|e| e.remaining).sum()
    }

    pub fn into_outputs(self) -> Allocation {
        Allocation {
            earnings: self.queue,
            payments: self.payments,
        }
    }
}

/// Run a full allocation: sort payments oldest first and drain the queue.
pub fn allocate(earnings: Vec<Earning>, mut payments: Vec<Payment>) -> Allocation {
    sort_payments_for_allocation(&mut payments);

    let mut allocator = FifoAllocator::new(earnings);
    for payment in &payments {
        allocator.process_payment(payment);
    }
    allocator.into_outputs()
}
