use chrono::Utc;
use chronoscale::{TimeContext, TimeSystem};

fn main() {
    let ctx = TimeContext::default();

    let now = Utc::now();
    let (day, sec) = ctx.day_sec_from_datetime(&now);
    let (y, m, d) = ctx.calendar().ymd_from_day(day, false);

    println!("UTC: {now}  ->  day {day} ({y:04}-{m:02}-{d:02}), second {sec:.3}");
    println!("TAI - UTC: {} s", ctx.tai_minus_utc(day));
    println!("MJD(UTC): {:.6}", ctx.mjd_from_day_sec(day, sec));
    println!("JD(UTC):  {:.6}", ctx.jd_from_day_sec(day, sec));

    let tai = ctx.tai_from_day_sec(day, sec);
    for system in [TimeSystem::TAI, TimeSystem::TT, TimeSystem::TDB] {
        println!("{system}: {:.6} s since 2000-01-01", ctx.time_from_tai(system, tai));
    }

    // The 2016-12-31 leap second.
    let leap_day = ctx
        .calendar()
        .day_from_ymd(2016, 12, 31, false)
        .expect("valid date");
    println!("2016-12-31 lasted {} s", ctx.seconds_on_day(leap_day));
}
