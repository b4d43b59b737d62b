//! Stand-in Breakout game
//!
//! Only the paddle exists: it slides along the bottom edge with the arrow
//! keys (or A/D) and stays inside the play field.

use arcade_engine::prelude::*;

const PADDLE_WIDTH: f32 = 100.0;
const PADDLE_VELOCITY: f32 = 500.0;
const REPORT_INTERVAL: f32 = 1.0;

/// Paddle-only Breakout
pub struct Breakout {
    field_width: f32,
    paddle_x: f32,
    direction: f32,
    elapsed: f32,
    since_report: f32,
}

impl Breakout {
    /// New game on a play field `field_width` pixels wide
    pub fn new(field_width: u32) -> Self {
        let field_width = field_width as f32;
        Self {
            field_width,
            paddle_x: (field_width - PADDLE_WIDTH) / 2.0,
            direction: 0.0,
            elapsed: 0.0,
            since_report: 0.0,
        }
    }

    /// Left edge of the paddle in pixels
    pub fn paddle_x(&self) -> f32 {
        self.paddle_x
    }

    fn max_x(&self) -> f32 {
        (self.field_width - PADDLE_WIDTH).max(0.0)
    }
}

fn held(keys: &KeyStateTable, key: glfw::Key) -> bool {
    keys.is_pressed(key as i32)
}

impl Game for Breakout {
    fn init(&mut self) -> Result<(), GameError> {
        if self.field_width <= 0.0 {
            return Err(GameError::Init(format!(
                "play field width {} is not positive",
                self.field_width
            )));
        }
        log::info!("Breakout initialized, paddle at {:.1}", self.paddle_x);
        Ok(())
    }

    fn process_input(&mut self, _delta_time: f32, keys: &KeyStateTable) -> Result<(), GameError> {
        let left = held(keys, glfw::Key::Left) || held(keys, glfw::Key::A);
        let right = held(keys, glfw::Key::Right) || held(keys, glfw::Key::D);
        self.direction = match (left, right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        Ok(())
    }

    fn update(&mut self, delta_time: f32) -> Result<(), GameError> {
        if !delta_time.is_finite() {
            return Err(GameError::Update(format!("frame delta {delta_time} is not finite")));
        }

        let step = self.direction * PADDLE_VELOCITY * delta_time;
        self.paddle_x = (self.paddle_x + step).clamp(0.0, self.max_x());

        self.elapsed += delta_time;
        self.since_report += delta_time;
        if self.since_report >= REPORT_INTERVAL {
            self.since_report = 0.0;
            log::debug!("t={:.1}s paddle={:.1}", self.elapsed, self.paddle_x);
        }
        Ok(())
    }

    fn render(&mut self) -> Result<(), GameError> {
        Ok(())
    }

    fn release(&mut self) {
        log::info!("Breakout released after {:.1}s", self.elapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys_with(pressed: &[glfw::Key]) -> KeyStateTable {
        let mut keys = KeyStateTable::new();
        for key in pressed {
            keys.set(*key as i32, true);
        }
        keys
    }

    #[test]
    fn test_paddle_starts_centered() {
        let game = Breakout::new(1280);
        assert!((game.paddle_x() - 590.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_paddle_moves_with_arrow_keys() {
        let mut game = Breakout::new(1280);
        game.process_input(0.1, &keys_with(&[glfw::Key::Right])).unwrap();
        game.update(0.1).unwrap();
        assert!((game.paddle_x() - 640.0).abs() < 1e-3);

        game.process_input(0.1, &keys_with(&[glfw::Key::Left])).unwrap();
        game.update(0.1).unwrap();
        assert!((game.paddle_x() - 590.0).abs() < 1e-3);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut game = Breakout::new(1280);
        game.process_input(0.1, &keys_with(&[glfw::Key::A, glfw::Key::D]))
            .unwrap();
        game.update(0.1).unwrap();
        assert!((game.paddle_x() - 590.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_paddle_stays_in_field() {
        let mut game = Breakout::new(1280);
        let keys = keys_with(&[glfw::Key::Left]);
        for _ in 0..100 {
            game.process_input(0.1, &keys).unwrap();
            game.update(0.1).unwrap();
        }
        assert_eq!(game.paddle_x(), 0.0);

        let keys = keys_with(&[glfw::Key::Right]);
        for _ in 0..100 {
            game.process_input(0.1, &keys).unwrap();
            game.update(0.1).unwrap();
        }
        assert_eq!(game.paddle_x(), 1180.0);
    }

    #[test]
    fn test_non_finite_delta_fails_update() {
        let mut game = Breakout::new(1280);
        assert!(matches!(game.update(f32::NAN), Err(GameError::Update(_))));
        assert!(matches!(game.update(f32::INFINITY), Err(GameError::Update(_))));
        assert!((game.paddle_x() - 590.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_zero_width_field_fails_init() {
        let mut game = Breakout::new(0);
        assert!(matches!(game.init(), Err(GameError::Init(_))));
    }
}
