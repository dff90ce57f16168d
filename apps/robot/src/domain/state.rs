pub const PLAYERS: usize = 4;

/// Table position, 0..=3. Seat `n` maps to `players[n]` for the life of a table.
pub type Seat = u8;

/// Coarse progression of a hand, as seen from outside the aggregate.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    /// Players are calling in turn.
    Bidding,
    /// Cards are being played into tricks.
    Playing,
    /// Nothing left to do: passed out, all cards played, or never dealt.
    Terminal,
}

/// Seat / turn math helpers (4 fixed seats: 0..=3).
///
/// Clockwise direction is positive (+1).
#[inline]
pub fn seat_offset(seat: Seat, delta: i8) -> Seat {
    let seat_i = seat as i16;
    let delta_i = delta as i16;
    ((seat_i + delta_i).rem_euclid(PLAYERS as i16)) as Seat
}

/// Returns the next player clockwise (0 → 1 → 2 → 3 → 0).
#[inline]
pub fn next_seat(seat: Seat) -> Seat {
    seat_offset(seat, 1)
}

/// Seats 0/2 and 1/3 form the two sides.
#[inline]
pub fn same_side(a: Seat, b: Seat) -> bool {
    a % 2 == b % 2
}

/// Returns the seat `n` steps clockwise from `start`.
#[inline]
pub fn nth_from(start: Seat, n: usize) -> Seat {
    seat_offset(start, (n % PLAYERS) as i8)
}
