//! 周分桶工具
//!
//! 把时间点换算成"周起始日"（该时间点所在、不晚于它的最近一个周日）和小写的星期名称。
//! 所有换算都基于进程启动时确定的唯一时区，时区在构造 [`WeekClock`] 时注入。

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeDelta, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// `weekDate` 使用的日期格式
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 时区信息接口使用的时间格式
pub const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy)]
enum NowSource {
    System,
    Fixed(DateTime<Utc>),
}

/// 绑定某个时区的周时钟
///
/// 只读共享，构造后不再修改。测试可以通过 [`WeekClock::fixed_at`] 固定"当前时间"。
#[derive(Debug, Clone)]
pub struct WeekClock {
    timezone: Tz,
    now: NowSource,
}

impl WeekClock {
    pub fn new(timezone: Tz) -> Self {
        Self {
            timezone,
            now: NowSource::System,
        }
    }

    /// 按时区标识创建时钟，无法识别时回退到UTC
    pub fn from_name(name: &str) -> Self {
        match name.parse::<Tz>() {
            Ok(timezone) => Self::new(timezone),
            Err(e) => {
                warn!("加载时区 {} 失败，使用UTC: {}", name, e);
                Self::new(chrono_tz::UTC)
            }
        }
    }

    pub fn utc() -> Self {
        Self::new(chrono_tz::UTC)
    }

    /// 固定"当前时间"
    pub fn fixed_at(mut self, instant: DateTime<Utc>) -> Self {
        self.now = NowSource::Fixed(instant);
        self
    }

    pub fn timezone_name(&self) -> &'static str {
        self.timezone.name()
    }

    pub fn now(&self) -> DateTime<Utc> {
        match self.now {
            NowSource::System => Utc::now(),
            NowSource::Fixed(instant) => instant,
        }
    }

    /// 时间点所在周的周日（按配置时区的日历日计算）
    pub fn week_start(&self, instant: DateTime<Utc>) -> NaiveDate {
        week_start_of(instant.with_timezone(&self.timezone).date_naive())
    }

    /// 时间点在配置时区下的小写星期名称
    pub fn day_name(&self, instant: DateTime<Utc>) -> &'static str {
        day_name_of(instant.with_timezone(&self.timezone).weekday())
    }

    /// 当前周的 `weekDate` 字符串
    pub fn current_week(&self) -> String {
        self.week_start(self.now()).format(DATE_FORMAT).to_string()
    }

    /// 今天的星期名称
    pub fn today(&self) -> &'static str {
        self.day_name(self.now())
    }

    pub fn snapshot(&self) -> TimezoneSnapshot {
        let now = self.now();
        let zoned = now.with_timezone(&self.timezone);

        TimezoneSnapshot {
            timezone: self.timezone_name().to_string(),
            current_utc_time: now.format(DISPLAY_TIME_FORMAT).to_string(),
            current_local_time: zoned.format(DISPLAY_TIME_FORMAT).to_string(),
            timezone_offset: zoned.format("%:z").to_string(),
        }
    }

    /// 服务器本机时区下的当前时间，仅用于调试接口
    pub fn server_local_time(&self) -> String {
        self.now()
            .with_timezone(&Local)
            .format(DISPLAY_TIME_FORMAT)
            .to_string()
    }
}

/// 服务器进程本机时区的名称，仅用于调试接口
///
/// `TZ` 设置时返回其值，`TZ` 为空串表示UTC，未设置时为 `Local`。
pub fn server_timezone_name() -> String {
    local_zone_label(std::env::var("TZ").ok().as_deref())
}

fn local_zone_label(tz: Option<&str>) -> String {
    match tz {
        Some("") => "UTC".to_string(),
        Some(name) => name.to_string(),
        None => "Local".to_string(),
    }
}

impl Default for WeekClock {
    fn default() -> Self {
        Self::utc()
    }
}

/// 配置时区的时间快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimezoneSnapshot {
    pub timezone: String,
    pub current_utc_time: String,
    pub current_local_time: String,
    pub timezone_offset: String,
}

/// 日历日所在周的周日
pub fn week_start_of(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_sunday();
    date - TimeDelta::days(i64::from(offset))
}

pub fn day_name_of(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "sunday",
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
    }
}
