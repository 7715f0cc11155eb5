///! Tick records and the fee growth inside a tick range
///!

/// Info for a price tick, as read out of a tick array
///
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Tick {
    /// The price tick whose info is stored in the record
    pub tick_index: i32,

    /// Whether the tick is referenced by any position
    pub initialized: bool,

    /// Amount of net liquidity added (subtracted) when tick is crossed from left to right (right to left)
    pub liquidity_net: i128,

    /// The total position liquidity that references this tick
    pub liquidity_gross: u128,

    /// Fee growth per unit of liquidity on the _other_ side of this tick (relative to the current tick)
    /// only has relative meaning, not absolute. The value depends on when the tick is initialized
    pub fee_growth_outside_a: u128,
    pub fee_growth_outside_b: u128,
}

impl Tick {
    /// A tick that no position references. Its outside fee growth is zero.
    pub fn uninitialized(tick_index: i32) -> Tick {
        Tick {
            tick_index,
            ..Tick::default()
        }
    }

    /// Fee growth outside the tick, zero while the tick is uninitialized
    pub fn fee_growth_outside(&self) -> (u128, u128) {
        if self.initialized {
            (self.fee_growth_outside_a, self.fee_growth_outside_b)
        } else {
            (0, 0)
        }
    }

    /// Retrieves the all time fee growth data in token_a and token_b, per unit of liquidity,
    /// inside a position's tick boundaries.
    ///
    /// Calculates `fr = fg - f_below(lower) - f_above(upper)`, formula 6.19
    ///
    /// Every subtraction wraps modulo 2^128. Growth counters are allowed to overflow,
    /// only their differences are meaningful.
    ///
    /// # Arguments
    ///
    /// * `tick_lower` - The lower tick boundary of the position
    /// * `tick_upper` - The upper tick boundary of the position
    /// * `tick_current` - The current tick
    /// * `fee_growth_global_a` - The all-time global fee growth, per unit of liquidity, in token_a
    /// * `fee_growth_global_b` - The all-time global fee growth, per unit of liquidity, in token_b
    ///
    pub fn get_fee_growth_inside(
        tick_lower: &Tick,
        tick_upper: &Tick,
        tick_current: i32,
        fee_growth_global_a: u128,
        fee_growth_global_b: u128,
    ) -> (u128, u128) {
        let (lower_outside_a, lower_outside_b) = tick_lower.fee_growth_outside();
        let (upper_outside_a, upper_outside_b) = tick_upper.fee_growth_outside();

        // calculate fee growth below
        let (fee_growth_below_a, fee_growth_below_b) = if tick_current >= tick_lower.tick_index {
            (lower_outside_a, lower_outside_b)
        } else {
            (
                fee_growth_global_a.wrapping_sub(lower_outside_a),
                fee_growth_global_b.wrapping_sub(lower_outside_b),
            )
        };

        // Calculate fee growth above
        let (fee_growth_above_a, fee_growth_above_b) = if tick_current < tick_upper.tick_index {
            (upper_outside_a, upper_outside_b)
        } else {
            (
                fee_growth_global_a.wrapping_sub(upper_outside_a),
                fee_growth_global_b.wrapping_sub(upper_outside_b),
            )
        };

        let fee_growth_inside_a = fee_growth_global_a
            .wrapping_sub(fee_growth_below_a)
            .wrapping_sub(fee_growth_above_a);
        let fee_growth_inside_b = fee_growth_global_b
            .wrapping_sub(fee_growth_below_b)
            .wrapping_sub(fee_growth_above_b);

        (fee_growth_inside_a, fee_growth_inside_b)
    }
}
