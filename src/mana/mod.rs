//! Mana economy: payment, end-of-turn banking, and refill.

mod economy;

pub use economy::{apply_payment, end_of_turn_rollover, pay_cost, quote, refill, ManaPayment};
