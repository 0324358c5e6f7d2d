use anchor_lang::prelude::*;

use crate::errors::EngineError;
use super::Placement;

/// Half-open interval overlap: [a_start, a_end) intersects [b_start, b_end).
pub fn overlaps(a_start: i64, a_end: i64, b_start: i64, b_end: i64) -> bool {
    a_start < b_end && b_start < a_end
}

/// One unit of pool capacity held for a window. Created at approval,
/// re-anchored at activation, marked released on rejection or expiry.
#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct SlotEntry {
    /// Pool-local id, referenced by PromotionOrder.reservation_id.
    pub id: u64,
    /// The order account holding this entry.
    pub order: Pubkey,
    pub starts_at: i64,
    pub ends_at: i64,
    pub released: bool,
}

impl SlotEntry {
    // id(8) + order(32) + starts_at(8) + ends_at(8) + released(1)
    pub const SIZE: usize = 8 + 32 + 8 + 8 + 1;
}

/// A capacity-constrained pool of promotion slots.
/// PDA seeds = [b"pool", placement_byte, category_key_bytes]
/// (category_key is empty for homepage).
///
/// Admission is an interval-overlap query against the entry arena, never a
/// running counter: orders can be approved long before earlier occupancies
/// end, and only overlap queries express time-bounded capacity correctly.
#[account]
pub struct SlotPool {
    pub placement: Placement,
    /// Configured concurrent-slot limit. Never hard-coded.
    pub capacity: u16,
    /// Monotonic entry id source; first issued id is 1.
    pub next_entry_id: u64,
    /// Bump seed for this PDA.
    pub bump: u8,
    /// Category pool key; empty for homepage.
    pub category_key: String,
    /// Bounded interval arena. Released entries are retained until the
    /// arena needs the space (order accounts are the durable audit trail).
    pub entries: Vec<SlotEntry>,
}

impl SlotPool {
    pub const SEED: &'static [u8] = b"pool";
    pub const MAX_CATEGORY_KEY_LEN: usize = 32;
    pub const MAX_ENTRIES: usize = 32;
    // discriminator(8) + placement(1) + capacity(2) + next_entry_id(8)
    // + bump(1) + category_key(4 + MAX) + entries(4 + MAX * SlotEntry::SIZE)
    pub const SIZE: usize = 8
        + 1
        + 2
        + 8
        + 1
        + (4 + Self::MAX_CATEGORY_KEY_LEN)
        + (4 + Self::MAX_ENTRIES * SlotEntry::SIZE);

    /// Number of non-released entries whose window overlaps [starts_at, ends_at).
    pub fn overlap_count(&self, starts_at: i64, ends_at: i64) -> usize {
        self.entries
            .iter()
            .filter(|e| !e.released && overlaps(e.starts_at, e.ends_at, starts_at, ends_at))
            .count()
    }

    /// The admission decision: grant a reservation for the window if the
    /// pool has spare capacity across the whole of it, otherwise fail with
    /// CapacityExceeded and leave the pool untouched.
    pub fn reserve(&mut self, order: Pubkey, starts_at: i64, ends_at: i64) -> Result<u64> {
        require!(
            self.overlap_count(starts_at, ends_at) < self.capacity as usize,
            EngineError::CapacityExceeded
        );
        if self.entries.len() >= Self::MAX_ENTRIES {
            self.entries.retain(|e| !e.released);
        }
        require!(self.entries.len() < Self::MAX_ENTRIES, EngineError::PoolSaturated);
        self.next_entry_id += 1;
        let id = self.next_entry_id;
        self.entries.push(SlotEntry {
            id,
            order,
            starts_at,
            ends_at,
            released: false,
        });
        Ok(id)
    }

    /// Mark an entry released, freeing its capacity. Idempotent: releasing
    /// an already-released or already-compacted entry is a no-op.
    pub fn release(&mut self, entry_id: u64) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == entry_id) {
            entry.released = true;
        }
    }

    /// Re-anchor a held entry to the actual occupancy window at activation
    /// time (approval reserved from the approval instant; the slot goes
    /// live at activation).
    ///
    /// The shifted window is re-admitted against every other non-released
    /// entry: a late activation must not push an occupancy into a window
    /// that was only free at approval time.
    pub fn reanchor(&mut self, entry_id: u64, starts_at: i64, ends_at: i64) -> Result<()> {
        self.entries
            .iter()
            .find(|e| e.id == entry_id && !e.released)
            .ok_or(error!(EngineError::ReservationNotFound))?;
        let others = self
            .entries
            .iter()
            .filter(|e| {
                e.id != entry_id
                    && !e.released
                    && overlaps(e.starts_at, e.ends_at, starts_at, ends_at)
            })
            .count();
        require!(
            others < self.capacity as usize,
            EngineError::CapacityExceeded
        );
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == entry_id)
            .ok_or(error!(EngineError::ReservationNotFound))?;
        entry.starts_at = starts_at;
        entry.ends_at = ends_at;
        Ok(())
    }
}
