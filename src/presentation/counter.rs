use std::time::Duration;

pub const COUNTER_DURATION: Duration = Duration::from_millis(1400);

pub fn ease_out_cubic(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// 由 0 緩動到目標值的數字計數器，例如 `"500+"`
#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    target: i64,
    suffix: String,
    duration: Duration,
}

impl CounterAnimation {
    /// 解析開頭的整數作為目標值，標籤中去掉所有數字後的部分作為後綴。
    /// 沒有開頭整數時回傳 `None`（不做動畫）。
    pub fn from_label(label: &str) -> Option<Self> {
        let trimmed = label.trim_start();
        let (sign, rest) = match trimmed.chars().next() {
            Some('-') => (-1, &trimmed[1..]),
            Some('+') => (1, &trimmed[1..]),
            _ => (1, trimmed),
        };

        let leading: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
        if leading.is_empty() {
            return None;
        }
        let target = leading.parse::<i64>().ok()? * sign;
        let suffix = label.chars().filter(|c| !c.is_ascii_digit()).collect();

        Some(Self {
            target,
            suffix,
            duration: COUNTER_DURATION,
        })
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn value_at(&self, elapsed: Duration) -> i64 {
        let eased = ease_out_cubic(self.progress(elapsed));
        (self.target as f64 * eased + 0.5).floor() as i64
    }

    pub fn text_at(&self, elapsed: Duration) -> String {
        format!("{}{}", self.value_at(elapsed), self.suffix)
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        self.progress(elapsed) >= 1.0
    }

    /// 在動畫期間平均取樣 `count` 個畫面，最後一格一定是最終值
    pub fn frames(&self, count: usize) -> Vec<String> {
        let count = count.max(1);
        (1..=count)
            .map(|i| {
                let elapsed = self.duration.mul_f64(i as f64 / count as f64);
                self.text_at(elapsed)
            })
            .collect()
    }
}
