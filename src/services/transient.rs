use std::time::{Duration, Instant};

/// “已复制”提示的显示时长
pub const COPIED_ACK_DURATION: Duration = Duration::from_millis(2000);

/// 一段时间后自动复位的标志
///
/// 以截止时间实现：读取时比较当前时间，无需后台线程；再次 raise 会重新计时。
#[derive(Debug, Clone)]
pub struct TransientFlag {
    duration: Duration,
    raised_at: Option<Instant>,
}

impl Default for TransientFlag {
    fn default() -> Self {
        Self::new(COPIED_ACK_DURATION)
    }
}

impl TransientFlag {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            raised_at: None,
        }
    }

    pub fn raise(&mut self) {
        self.raise_at(Instant::now());
    }

    pub fn raise_at(&mut self, now: Instant) {
        self.raised_at = Some(now);
    }

    pub fn clear(&mut self) {
        self.raised_at = None;
    }

    pub fn is_active(&self) -> bool {
        self.is_active_at(Instant::now())
    }

    pub fn is_active_at(&self, now: Instant) -> bool {
        self.remaining_at(now).is_some()
    }

    /// 距离自动复位还剩的时间；未点亮或已过期时为 None
    pub fn remaining(&self) -> Option<Duration> {
        self.remaining_at(Instant::now())
    }

    pub fn remaining_at(&self, now: Instant) -> Option<Duration> {
        let at = self.raised_at?;
        self.duration
            .checked_sub(now.saturating_duration_since(at))
            .filter(|left| !left.is_zero())
    }
}
