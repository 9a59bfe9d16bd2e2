//! Pure vesting-schedule arithmetic (§4.6).

/// Split `total` into `n_epochs` equal per-epoch amounts, with the division
/// remainder added to `[0]` (spec §4.6: "splits `total` as `total/n` per
/// epoch with remainder added to `[0]`").
pub fn split_vesting(total: i64, n_epochs: u32) -> Vec<i64> {
    let n = n_epochs as i64;
    let share = total / n;
    let rem = total % n;
    let mut amounts = vec![share; n_epochs as usize];
    if let Some(first) = amounts.first_mut() {
        *first += rem;
    }
    amounts
}
