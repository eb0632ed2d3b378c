use bbsweep::{Amplitude, Capabilities, Frequency, MemorySettings, Mode, SettingsStore, SweepSettings};

fn print_settings(settings: &SweepSettings) {
    println!("  mode:      {:?}", settings.mode());
    println!("  start:     {}", settings.start());
    println!("  stop:      {}", settings.stop());
    println!("  center:    {}", settings.center());
    println!("  span:      {}", settings.span());
    println!("  rbw:       {}{}{}", settings.rbw(),
             if settings.auto_rbw() { " (auto)" } else { "" },
             if settings.native_rbw() { " (native)" } else { "" });
    println!("  vbw:       {}{}", settings.vbw(),
             if settings.auto_vbw() { " (auto)" } else { "" });
    println!("  ref level: {}", settings.ref_level());
}

fn main() -> bbsweep::Result<()> {
    env_logger::init();

    // e.g. `sweep-demo 27e6` for a BB60C
    let max_rt_span = std::env::args().nth(1)
        .and_then(|arg| arg.parse::<f64>().ok())
        .map(Frequency::from_hz)
        .unwrap_or(Capabilities::bb60a().max_rt_span);
    let caps = Capabilities::bb60a().with_max_real_time_span(max_rt_span)?;

    let mut settings = SweepSettings::with_capabilities(caps);
    settings.subscribe(|settings, changes| {
        println!("==> updated {:?}", changes);
        print_settings(settings);
    });

    settings.set_center(Frequency::from_ghz(2.44));
    settings.set_span(Frequency::from_mhz(100.0));
    settings.set_rbw(Frequency::from_khz(10.0));
    settings.set_ref_level(Amplitude::dbm(-10.0));
    settings.shift_ref_level(false);
    settings.set_mode(Mode::RealTime);
    settings.notify();
    settings.increase_span(false);

    let mut preset = MemorySettings::new();
    settings.save(&mut preset);
    println!("saved {} keys:", preset.len());
    for key in preset.keys() {
        if let Some(value) = preset.value(key) {
            println!("  {} = {}", key, value);
        }
    }

    let mut restored = SweepSettings::with_capabilities(caps);
    restored.load(&preset);
    println!("restored preset matches: {}", restored == settings);
    Ok(())
}
