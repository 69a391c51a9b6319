use joyled_core::{
    control::{IterationReport, LoopFaults},
    timing::STATUS_REPORT_INTERVAL_MS,
};
use log::info;

/// Logs the first occurrence of each collaborator fault kind.
#[derive(Debug, Default)]
pub(super) struct FaultLog {
    logged: LoopFaults,
}

impl FaultLog {
    pub(super) fn note(&mut self, faults: LoopFaults) {
        if faults.sample && !self.logged.sample {
            esp_println::println!("adc: sample failed");
            info!("adc sample failed; axis held at rest");
            self.logged.sample = true;
        }
        if faults.pwm && !self.logged.pwm {
            esp_println::println!("pwm: duty update failed");
            info!("led pwm duty update failed");
            self.logged.pwm = true;
        }
        if faults.display && !self.logged.display {
            esp_println::println!("display: flush failed");
            info!("display flush failed");
            self.logged.display = true;
        }
        if faults.green_led && !self.logged.green_led {
            esp_println::println!("led: green write failed");
            info!("green led pin write failed");
            self.logged.green_led = true;
        }
    }
}

/// Periodic one-line summary of what the loop is doing.
#[derive(Debug)]
pub(super) struct StatusReporter {
    window_start_ms: u64,
    iterations: u32,
    faulted: u32,
}

impl StatusReporter {
    pub(super) fn new(now_ms: u64) -> Self {
        Self {
            window_start_ms: now_ms,
            iterations: 0,
            faulted: 0,
        }
    }

    pub(super) fn track(&mut self, report: &IterationReport, now_ms: u64) {
        self.iterations = self.iterations.saturating_add(1);
        if report.faults.any() {
            self.faulted = self.faulted.saturating_add(1);
        }

        let elapsed_ms = now_ms.saturating_sub(self.window_start_ms);
        if elapsed_ms < STATUS_REPORT_INTERVAL_MS {
            return;
        }

        let cursor = report.frame.cursor();
        info!(
            "status x={} y={} red={} blue={} cursor=({}, {}) pwm_enabled={} led_green_on={} border={} iterations={} faulted={} elapsed_ms={}",
            report.sample.axis_x,
            report.sample.corrected_y(),
            report.outputs.red,
            report.outputs.blue,
            cursor.x,
            cursor.y,
            report.state.pwm_enabled,
            report.state.led_green_on,
            report.state.border_style.as_str(),
            self.iterations,
            self.faulted,
            elapsed_ms
        );

        self.window_start_ms = now_ms;
        self.iterations = 0;
        self.faulted = 0;
    }
}
