//! Per-worker search state.

use crate::cards::{pack, Card};
use crate::chain::DeckChain;
use crate::deck::{count_sets, SetCount};
use crate::engine::CancelToken;
use std::sync::Arc;

/// Read-only inputs shared by every worker batch.
pub(crate) struct BatchInputs<'a> {
    pub pack_effective: &'a [Card],
    pub deck_size: usize,
    pub batch_size: usize,
}

/// An evaluated deck awaiting the coordinator's drain.
pub(crate) struct ReportedDeck {
    pub chain: Arc<DeckChain>,
    pub count: SetCount,
}

/// One worker's queues. Only the owning worker touches them during a
/// batch; the coordinator drains `reported` between batches.
pub(crate) struct WorkContext {
    /// Pending nodes, used as a stack. LIFO pops the deepest deck first,
    /// which drains branches before growing new ones and keeps the queue
    /// shallow.
    pub pending: Vec<Arc<DeckChain>>,
    pub reported: Vec<ReportedDeck>,
}

impl WorkContext {
    pub fn new() -> WorkContext {
        WorkContext {
            pending: Vec::new(),
            reported: Vec::new(),
        }
    }

    /// Evaluate up to `batch_size` pending decks: materialize, count Sets
    /// (short-circuiting at the first hit), extend the Set-free ones that
    /// are still below the target size, and queue everything for report.
    pub fn run_batch(&mut self, inputs: &BatchInputs<'_>, cancel: &CancelToken) {
        if cancel.is_cancelled() {
            return;
        }
        let mut scratch = *pack();
        for _ in 0..inputs.batch_size {
            let Some(chain) = self.pending.pop() else {
                break;
            };
            let n = chain.write_cards(&mut scratch);
            let count = count_sets(&scratch[..n], true);
            // A deck too small to hold a triple (tested == 0) is always
            // extended; otherwise only Set-free decks grow.
            if n < inputs.deck_size && (count.sets == 0 || count.tested == 0) {
                for pos in (chain.last_pos() + 1)..inputs.pack_effective.len() {
                    self.pending.push(chain.child(inputs.pack_effective[pos], pos));
                }
            }
            self.reported.push(ReportedDeck { chain, count });
        }
    }
}
