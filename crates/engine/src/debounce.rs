//! Quiet-period coalescing for change notifications.

use std::future::pending;
use std::time::Duration;

use tokio::time::{Instant, sleep_until};

/// Coalesces a high-frequency stream of arm calls into a single delayed
/// firing per quiet period.
///
/// At most one deadline is pending at any time: [`arm`](Self::arm) replaces
/// any previously armed, not-yet-elapsed deadline, so only the most recent
/// request within a quiet period survives, and arming arbitrarily often
/// never accumulates timers. A deadline that has already elapsed is gone
/// and cannot be retroactively cancelled.
#[derive(Debug)]
pub struct Debounce {
	quiet_period: Duration,
	deadline: Option<Instant>,
}

impl Debounce {
	pub fn new(quiet_period: Duration) -> Self {
		Self {
			quiet_period,
			deadline: None,
		}
	}

	pub fn quiet_period(&self) -> Duration {
		self.quiet_period
	}

	/// Schedules (or reschedules) the firing for one quiet period from now.
	pub fn arm(&mut self) {
		self.deadline = Some(Instant::now() + self.quiet_period);
	}

	/// Drops any pending firing.
	pub fn disarm(&mut self) {
		self.deadline = None;
	}

	pub fn is_armed(&self) -> bool {
		self.deadline.is_some()
	}

	/// Resolves once the armed deadline passes, clearing it.
	///
	/// Pends forever while disarmed. Cancel-safe: dropping the future (for
	/// example after losing a `select!` race) leaves the armed deadline in
	/// place for the next call.
	pub async fn elapsed(&mut self) {
		match self.deadline {
			Some(deadline) => {
				sleep_until(deadline).await;
				self.deadline = None;
			}
			None => pending().await,
		}
	}
}

#[cfg(test)]
mod tests {
	use tokio::time::advance;

	use super::*;

	const QUIET: Duration = Duration::from_millis(300);

	/// Asserts that `debounce` does not fire within `window`.
	async fn assert_silent(debounce: &mut Debounce, window: Duration) {
		tokio::select! {
			() = debounce.elapsed() => panic!("unexpected firing"),
			() = tokio::time::sleep(window) => {}
		}
	}

	#[tokio::test(flavor = "current_thread", start_paused = true)]
	async fn fires_once_one_quiet_period_after_last_arm() {
		let mut debounce = Debounce::new(QUIET);
		debounce.arm();

		let armed_at = Instant::now();
		debounce.elapsed().await;

		assert_eq!(Instant::now() - armed_at, QUIET);
		assert!(!debounce.is_armed());
	}

	#[tokio::test(flavor = "current_thread", start_paused = true)]
	async fn burst_coalesces_into_single_firing() {
		let mut debounce = Debounce::new(QUIET);

		// Every arm lands well inside the previous quiet period.
		for _ in 0..10 {
			debounce.arm();
			advance(Duration::from_millis(50)).await;
		}
		debounce.arm();
		let last_arm_at = Instant::now();

		debounce.elapsed().await;
		assert_eq!(Instant::now() - last_arm_at, QUIET);

		// Nothing further is pending.
		assert_silent(&mut debounce, QUIET * 4).await;
	}

	#[tokio::test(flavor = "current_thread", start_paused = true)]
	async fn separated_arms_each_fire() {
		let mut debounce = Debounce::new(QUIET);

		debounce.arm();
		debounce.elapsed().await;

		advance(QUIET * 2).await;

		debounce.arm();
		debounce.elapsed().await;

		assert!(!debounce.is_armed());
	}

	#[tokio::test(flavor = "current_thread", start_paused = true)]
	async fn thousand_rapid_arms_fire_exactly_once() {
		let mut debounce = Debounce::new(QUIET);

		for _ in 0..1000 {
			debounce.arm();
			advance(Duration::from_millis(1)).await;
		}

		debounce.elapsed().await;
		assert_silent(&mut debounce, QUIET * 4).await;
	}

	#[tokio::test(flavor = "current_thread", start_paused = true)]
	async fn disarmed_debounce_never_fires() {
		let mut debounce = Debounce::new(QUIET);

		debounce.arm();
		debounce.disarm();
		assert!(!debounce.is_armed());

		assert_silent(&mut debounce, QUIET * 4).await;
	}

	#[tokio::test(flavor = "current_thread", start_paused = true)]
	async fn losing_a_select_race_keeps_the_deadline() {
		let mut debounce = Debounce::new(QUIET);
		debounce.arm();
		let armed_at = Instant::now();

		// Another event wins the race before the quiet period elapses; the
		// dropped future must not disturb the pending deadline.
		tokio::select! {
			() = debounce.elapsed() => panic!("quiet period has not elapsed"),
			() = tokio::time::sleep(Duration::from_millis(10)) => {}
		}
		assert!(debounce.is_armed());

		debounce.elapsed().await;
		assert_eq!(Instant::now() - armed_at, QUIET);
	}
}
