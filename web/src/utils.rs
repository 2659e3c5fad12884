use std::cell::RefCell;

use js_sys::Math::random;

/// Seed built from two 32-bit draws of `Math.random`.
pub(crate) fn js_random_seed() -> u64 {
    let draw = || (random() * f64::from(u32::MAX)) as u64;
    (draw() << 32) | draw()
}

/// Runs `f` on the borrowed value, `None` when it is already borrowed further up the stack.
pub(crate) fn try_with<T, U>(cell: &RefCell<T>, f: impl FnOnce(&mut T) -> U) -> Option<U> {
    match cell.try_borrow_mut() {
        Ok(mut value) => Some(f(&mut value)),
        Err(_) => None,
    }
}

/// Delivers the tick that just fired plus any missed while `cell` was busy.
///
/// Returns how many ticks were delivered, zero when they are carried over to the next call.
pub(crate) fn deliver_ticks<T>(
    cell: &RefCell<T>,
    missed: &mut u32,
    mut tick: impl FnMut(&mut T),
) -> u32 {
    let due = missed.saturating_add(1);
    match try_with(cell, |value| (0..due).for_each(|_| tick(value))) {
        Some(()) => {
            *missed = 0;
            due
        }
        None => {
            *missed = due;
            0
        }
    }
}
