use chrono::{
    DateTime, Datelike, Duration, FixedOffset, Months, NaiveDate, NaiveDateTime, TimeZone,
    Timelike, Utc,
};

const SECOND_MS: i64 = 1_000;
const MINUTE_MS: i64 = 60 * SECOND_MS;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;
const WEEK_MS: i64 = 7 * DAY_MS;
const MONTH_MS: i64 = 30 * DAY_MS;
const YEAR_MS: i64 = 365 * DAY_MS;

const MAX_TICKS: usize = 10_000;

/// Continuous linear map from `domain` to `range`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn apply(&self, value: f64) -> f64 {
        interpolate(normalize(self.domain, value), self.range)
    }

    pub fn invert(&self, pixel: f64) -> f64 {
        interpolate(normalize(self.range, pixel), self.domain)
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = ordered(self.domain);
        linear_ticks(lo, hi, count)
    }
}

/// Square-root scale: output area, not radius, grows linearly with input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrtScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl SqrtScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// A zero-width domain maps everything to the lower end of the range.
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = (signed_sqrt(self.domain.0), signed_sqrt(self.domain.1));
        if d1 == d0 {
            return self.range.0;
        }
        interpolate((signed_sqrt(value) - d0) / (d1 - d0), self.range)
    }
}

/// Linear map from instants to pixels. Instants are handled as epoch
/// milliseconds; calendar arithmetic for `nice` and `ticks` runs in UTC.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    pub domain: (DateTime<FixedOffset>, DateTime<FixedOffset>),
    pub range: (f64, f64),
}

impl TimeScale {
    pub fn new(domain: (DateTime<FixedOffset>, DateTime<FixedOffset>), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Builds a scale over the min and max of `instants`. `None` when empty.
    pub fn from_extent<I>(instants: I, range: (f64, f64)) -> Option<Self>
    where
        I: IntoIterator<Item = DateTime<FixedOffset>>,
    {
        let mut iter = instants.into_iter();
        let first = iter.next()?;
        let (lo, hi) = iter.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));
        Some(Self::new((lo, hi), range))
    }

    pub fn is_degenerate(&self) -> bool {
        self.domain.0 == self.domain.1
    }

    pub fn apply(&self, instant: &DateTime<FixedOffset>) -> f64 {
        let (d0, d1) = self.domain_millis();
        interpolate(
            normalize((d0 as f64, d1 as f64), instant.timestamp_millis() as f64),
            self.range,
        )
    }

    /// Maps a range value back to an instant, reported in the offset of the
    /// domain start. A zero-width domain inverts to its single instant, and
    /// the range ends invert to the exact domain ends.
    pub fn invert(&self, value: f64) -> DateTime<FixedOffset> {
        let (d0, d1) = self.domain_millis();
        if self.is_degenerate() {
            return self.domain.0;
        }
        let t = normalize(self.range, value);
        if t <= 0.0 {
            return self.domain.0;
        }
        if t >= 1.0 {
            return self.domain.1;
        }
        let millis = d0 + (t * (d1 - d0) as f64).round() as i64;
        from_millis(millis, self.domain.0.timezone()).unwrap_or(self.domain.0)
    }

    /// Extends the domain outward to round boundaries of the interval that
    /// would produce about ten ticks.
    pub fn nice(mut self) -> Self {
        if self.is_degenerate() {
            return self;
        }
        let (d0, d1) = self.domain_millis();
        let interval = TickInterval::for_span(d0, d1, 10);
        let offset = self.domain.0.timezone();
        let lo = interval.floor(to_naive_utc(d0));
        let hi = interval.ceil(to_naive_utc(d1));
        if let (Some(lo), Some(hi)) = (from_naive_utc(lo, offset), from_naive_utc(hi, offset)) {
            self.domain = (lo, hi);
        }
        self
    }

    pub fn ticks(&self, count: usize) -> Vec<DateTime<FixedOffset>> {
        let (d0, d1) = self.domain_millis();
        let (lo, hi) = (d0.min(d1), d0.max(d1));
        if count == 0 {
            return Vec::new();
        }
        if lo == hi {
            return vec![self.domain.0];
        }
        let interval = TickInterval::for_span(lo, hi, count);
        let offset = self.domain.0.timezone();
        let end = to_naive_utc(hi);

        let mut ticks = Vec::new();
        let mut t = interval.ceil(to_naive_utc(lo));
        while t <= end && ticks.len() < MAX_TICKS {
            if let Some(dt) = from_naive_utc(t, offset) {
                ticks.push(dt);
            }
            t = interval.step(t);
        }
        ticks
    }

    fn domain_millis(&self) -> (i64, i64) {
        (self.domain.0.timestamp_millis(), self.domain.1.timestamp_millis())
    }
}

/// Multi-scale tick label: the coarsest unit at which the instant is not
/// aligned decides the format.
pub fn format_time_tick(instant: &DateTime<FixedOffset>) -> String {
    let t = instant.with_timezone(&Utc);
    let fmt = if t.second() != 0 {
        ":%S"
    } else if t.minute() != 0 {
        "%I:%M"
    } else if t.hour() != 0 {
        "%I %p"
    } else if t.day() != 1 {
        if t.weekday().num_days_from_sunday() != 0 {
            "%a %d"
        } else {
            "%b %d"
        }
    } else if t.month() != 1 {
        "%B"
    } else {
        "%Y"
    };
    t.format(fmt).to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TickInterval {
    Millis(i64),
    Second(u32),
    Minute(u32),
    Hour(u32),
    Day(u32),
    Week,
    Month(u32),
    Year(i32),
}

const INTERVALS: [(TickInterval, i64); 17] = [
    (TickInterval::Second(1), SECOND_MS),
    (TickInterval::Second(5), 5 * SECOND_MS),
    (TickInterval::Second(15), 15 * SECOND_MS),
    (TickInterval::Second(30), 30 * SECOND_MS),
    (TickInterval::Minute(1), MINUTE_MS),
    (TickInterval::Minute(5), 5 * MINUTE_MS),
    (TickInterval::Minute(15), 15 * MINUTE_MS),
    (TickInterval::Minute(30), 30 * MINUTE_MS),
    (TickInterval::Hour(1), HOUR_MS),
    (TickInterval::Hour(3), 3 * HOUR_MS),
    (TickInterval::Hour(6), 6 * HOUR_MS),
    (TickInterval::Hour(12), 12 * HOUR_MS),
    (TickInterval::Day(1), DAY_MS),
    (TickInterval::Day(2), 2 * DAY_MS),
    (TickInterval::Week, WEEK_MS),
    (TickInterval::Month(1), MONTH_MS),
    (TickInterval::Month(3), 3 * MONTH_MS),
];

impl TickInterval {
    fn for_span(lo: i64, hi: i64, count: usize) -> Self {
        let target = (hi - lo).abs() as f64 / count.max(1) as f64;
        let i = INTERVALS.partition_point(|(_, ms)| (*ms as f64) <= target);

        if i == INTERVALS.len() {
            let step = tick_step(lo as f64 / YEAR_MS as f64, hi as f64 / YEAR_MS as f64, count);
            return TickInterval::Year(step.max(1.0) as i32);
        }
        if i == 0 {
            let step = tick_step(lo as f64, hi as f64, count);
            return TickInterval::Millis(step.max(1.0) as i64);
        }
        let (below, below_ms) = INTERVALS[i - 1];
        let (above, above_ms) = INTERVALS[i];
        if target / (below_ms as f64) < (above_ms as f64) / target {
            below
        } else {
            above
        }
    }

    fn floor(self, t: NaiveDateTime) -> NaiveDateTime {
        let date = t.date();
        let midnight = |d: NaiveDate| d.and_hms_opt(0, 0, 0).unwrap_or(t);
        match self {
            TickInterval::Millis(n) => {
                let ms = t.and_utc().timestamp_millis();
                to_naive_utc(ms - ms.rem_euclid(n))
            }
            TickInterval::Second(n) => date
                .and_hms_opt(t.hour(), t.minute(), t.second() - t.second() % n)
                .unwrap_or(t),
            TickInterval::Minute(n) => date
                .and_hms_opt(t.hour(), t.minute() - t.minute() % n, 0)
                .unwrap_or(t),
            TickInterval::Hour(n) => date.and_hms_opt(t.hour() - t.hour() % n, 0, 0).unwrap_or(t),
            TickInterval::Day(n) => {
                let back = (date.day() - 1) % n;
                midnight(date - Duration::days(back as i64))
            }
            TickInterval::Week => {
                let back = date.weekday().num_days_from_sunday();
                midnight(date - Duration::days(back as i64))
            }
            TickInterval::Month(n) => {
                let month0 = date.month0() - date.month0() % n;
                NaiveDate::from_ymd_opt(date.year(), month0 + 1, 1)
                    .map(midnight)
                    .unwrap_or(t)
            }
            TickInterval::Year(n) => {
                let year = date.year() - date.year().rem_euclid(n);
                NaiveDate::from_ymd_opt(year, 1, 1).map(midnight).unwrap_or(t)
            }
        }
    }

    fn ceil(self, t: NaiveDateTime) -> NaiveDateTime {
        let floored = self.floor(t);
        if floored == t {
            t
        } else {
            self.step(floored)
        }
    }

    /// Next boundary after an already-floored instant.
    fn step(self, t: NaiveDateTime) -> NaiveDateTime {
        match self {
            TickInterval::Millis(n) => t + Duration::milliseconds(n),
            TickInterval::Second(n) => t + Duration::seconds(n as i64),
            TickInterval::Minute(n) => t + Duration::minutes(n as i64),
            TickInterval::Hour(n) => t + Duration::hours(n as i64),
            TickInterval::Day(n) => self.floor(t + Duration::days(n as i64)),
            TickInterval::Week => t + Duration::days(7),
            TickInterval::Month(n) => t
                .checked_add_months(Months::new(n))
                .unwrap_or(t + Duration::days(31 * n as i64)),
            TickInterval::Year(n) => t
                .checked_add_months(Months::new(12 * n.max(1) as u32))
                .unwrap_or(t + Duration::days(366)),
        }
    }
}

/// Tick values at 1, 2 or 5 times a power of ten, covering `[start, stop]`.
pub fn linear_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    let count = count.min(MAX_TICKS);
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (i1, i2, inc) = tick_increment(start, stop, count);
    if i2 < i1 {
        return Vec::new();
    }
    (i1..=i2)
        .take(MAX_TICKS)
        .map(|i| if inc < 0.0 { i as f64 / -inc } else { i as f64 * inc })
        .collect()
}

fn tick_increment(start: f64, stop: f64, count: usize) -> (i64, i64, f64) {
    let e10 = 50f64.sqrt();
    let e5 = 10f64.sqrt();
    let e2 = 2f64.sqrt();

    let step = (stop - start) / count as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= e10 {
        10.0
    } else if error >= e5 {
        5.0
    } else if error >= e2 {
        2.0
    } else {
        1.0
    };

    if power < 0.0 {
        let inc = 10f64.powf(-power) / factor;
        let mut i1 = (start * inc).round() as i64;
        let mut i2 = (stop * inc).round() as i64;
        if (i1 as f64) / inc < start {
            i1 += 1;
        }
        if (i2 as f64) / inc > stop {
            i2 -= 1;
        }
        (i1, i2, -inc)
    } else {
        let inc = 10f64.powf(power) * factor;
        let mut i1 = (start / inc).round() as i64;
        let mut i2 = (stop / inc).round() as i64;
        if (i1 as f64) * inc < start {
            i1 += 1;
        }
        if (i2 as f64) * inc > stop {
            i2 -= 1;
        }
        (i1, i2, inc)
    }
}

fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let (lo, hi) = if stop < start { (stop, start) } else { (start, stop) };
    if lo == hi || count == 0 {
        return 1.0;
    }
    let (_, _, inc) = tick_increment(lo, hi, count);
    if inc < 0.0 {
        1.0 / -inc
    } else {
        inc
    }
}

fn normalize(domain: (f64, f64), value: f64) -> f64 {
    let span = domain.1 - domain.0;
    if span == 0.0 {
        0.5
    } else {
        (value - domain.0) / span
    }
}

fn interpolate(t: f64, range: (f64, f64)) -> f64 {
    range.0 + t * (range.1 - range.0)
}

fn ordered(pair: (f64, f64)) -> (f64, f64) {
    if pair.0 <= pair.1 {
        pair
    } else {
        (pair.1, pair.0)
    }
}

fn signed_sqrt(x: f64) -> f64 {
    if x < 0.0 {
        -(-x).sqrt()
    } else {
        x.sqrt()
    }
}

fn to_naive_utc(millis: i64) -> NaiveDateTime {
    DateTime::from_timestamp_millis(millis)
        .unwrap_or_default()
        .naive_utc()
}

fn from_naive_utc(t: NaiveDateTime, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    Some(Utc.from_utc_datetime(&t).with_timezone(&offset))
}

fn from_millis(millis: i64, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    DateTime::from_timestamp_millis(millis).map(|dt| dt.with_timezone(&offset))
}
