//! Vertical integrator for the player body
//!
//! Explicit Euler, one step per tick: velocity first, then position.

use super::state::Body;
use crate::tuning::SimParams;

/// What happened at the world edges during one integration step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// Touched nothing
    Airborne,
    /// Hit the ground and bounced back up with enough speed to keep going
    Bounced,
    /// Hit the ground and the bounce died out
    Settled,
    /// Went above the top of the world
    CeilingBreach,
}

impl Body {
    /// Advance one tick under gravity and resolve the ground and ceiling.
    ///
    /// The ceiling only counts when `check_ceiling` is set; a tumbling body
    /// is only ever stopped by the ground.
    pub fn advance(&mut self, params: &SimParams, check_ceiling: bool) -> Contact {
        self.vel += params.gravity;
        self.pos.y += self.vel;
        debug_assert!(
            self.pos.y.is_finite() && self.vel.is_finite(),
            "body went non-finite: {self:?}"
        );

        let ground = params.bounds.ground_line();
        if self.on_ground(ground) {
            self.pos.y = ground;
            self.bounce(params)
        } else if check_ceiling && self.pos.y < 0.0 {
            Contact::CeilingBreach
        } else {
            Contact::Airborne
        }
    }

    /// Reflect and damp the velocity, reporting whether it settled
    fn bounce(&mut self, params: &SimParams) -> Contact {
        self.vel = -self.vel * params.bounce_damping;
        if self.is_settled(params) {
            Contact::Settled
        } else {
            Contact::Bounced
        }
    }

    #[inline]
    pub fn is_settled(&self, params: &SimParams) -> bool {
        self.vel.abs() < params.settle_threshold
    }

    /// Overwrite velocity with the upward flap impulse
    pub fn flap(&mut self, params: &SimParams) {
        self.vel = -params.flap_impulse;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::{Bounds, Difficulty};

    fn params() -> SimParams {
        SimParams::for_difficulty(Difficulty::Easy, Bounds::default())
    }

    #[test]
    fn test_gravity_accumulates_exactly() {
        let params = params();
        let mut body = Body::spawn(&params.bounds);
        body.vel = -20.0;
        let y0 = body.pos.y;

        assert_eq!(body.advance(&params, true), Contact::Airborne);
        assert_eq!(body.vel, -17.5);
        assert_eq!(body.pos.y, y0 - 17.5);

        for _ in 0..4 {
            body.advance(&params, true);
        }
        assert_eq!(body.vel, -7.5);
    }

    #[test]
    fn test_flap_overwrites_velocity() {
        let params = params();
        let mut body = Body::spawn(&params.bounds);
        body.vel = 37.0;
        body.flap(&params);
        assert_eq!(body.vel, -20.0);
        body.flap(&params);
        assert_eq!(body.vel, -20.0);
    }

    #[test]
    fn test_ground_bounce_snaps_and_damps() {
        let params = params();
        let ground = params.bounds.ground_line();
        let mut body = Body::spawn(&params.bounds);
        body.pos.y = ground - 5.0;
        body.vel = 7.5;

        // 7.5 + 2.5 = 10 down, crosses the ground, bounces at -5
        assert_eq!(body.advance(&params, true), Contact::Bounced);
        assert_eq!(body.pos.y, ground);
        assert_eq!(body.vel, -5.0);
    }

    #[test]
    fn test_weak_bounce_settles() {
        let params = params();
        let ground = params.bounds.ground_line();
        let mut body = Body::spawn(&params.bounds);
        body.pos.y = ground;
        body.vel = -1.25;

        // -1.25 + 2.5 = 1.25 down, bounce to -0.625
        assert_eq!(body.advance(&params, false), Contact::Settled);
        assert_eq!(body.vel, -0.625);
    }

    #[test]
    fn test_ceiling_only_when_checked() {
        let params = params();
        let mut body = Body::spawn(&params.bounds);
        body.pos.y = 5.0;
        body.vel = -20.0;
        let mut tumbling = body;

        assert_eq!(body.advance(&params, true), Contact::CeilingBreach);
        assert_eq!(tumbling.advance(&params, false), Contact::Airborne);
    }

    #[test]
    fn test_repeated_bounces_always_settle() {
        let params = params();
        let mut body = Body::spawn(&params.bounds);
        body.vel = 0.0;

        let mut ticks = 0;
        loop {
            ticks += 1;
            assert!(ticks < 1000, "body never settled");
            if body.advance(&params, false) == Contact::Settled {
                break;
            }
        }
        assert_eq!(body.pos.y, params.bounds.ground_line());
    }
}
