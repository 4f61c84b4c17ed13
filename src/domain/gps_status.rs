// GPS status indicator model: satellite bars, accuracy label and GPS activity

/// Visible-satellite counts needed for each additional indicator bar.
pub const SAT_INDICATOR_THRESHOLDS: [usize; 5] = [2, 3, 4, 6, 8];

/// Number of bars to draw for `satellites` visible satellites.
pub fn satellite_bars(satellites: usize) -> u8 {
    SAT_INDICATOR_THRESHOLDS
        .iter()
        .rposition(|&threshold| satellites >= threshold)
        .unwrap_or(0) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SatIndicator {
    Off,
    Unknown,
    Bars(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpsEvent {
    Started,
    Stopped,
    FirstFix,
    SatelliteStatus(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderStatus {
    Available,
    OutOfService,
    TemporarilyUnavailable,
}

/// Change of GPS availability the recording controls should follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpsTransition {
    Enabled,
    Disabled,
}

#[derive(Debug, Clone)]
pub struct GpsStatusIndicator {
    indicator: SatIndicator,
    accuracy_label: String,
    active: bool,
    metres_label: String,
}

impl GpsStatusIndicator {
    pub fn new(metres_label: impl Into<String>) -> Self {
        Self {
            indicator: SatIndicator::Off,
            accuracy_label: String::new(),
            active: false,
            metres_label: metres_label.into(),
        }
    }

    pub fn indicator(&self) -> SatIndicator {
        self.indicator
    }

    pub fn accuracy_label(&self) -> &str {
        &self.accuracy_label
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn on_gps_event(&mut self, event: GpsEvent) {
        self.indicator = match event {
            GpsEvent::FirstFix => SatIndicator::Bars(0),
            GpsEvent::Started => SatIndicator::Unknown,
            GpsEvent::Stopped => SatIndicator::Off,
            GpsEvent::SatelliteStatus(count) => {
                let bars = satellite_bars(count);
                tracing::trace!("Found {} satellites, drawing {} bars", count, bars);
                SatIndicator::Bars(bars)
            }
        };
    }

    /// Records a location fix. The first fix after inactivity enables GPS.
    pub fn on_location(&mut self, accuracy: Option<f32>) -> Option<GpsTransition> {
        self.accuracy_label = match accuracy {
            Some(metres) => format!("{}{}", metres.round() as i64, self.metres_label),
            None => String::new(),
        };

        if self.active {
            None
        } else {
            self.active = true;
            Some(GpsTransition::Enabled)
        }
    }

    pub fn on_provider_enabled(&mut self) {
        tracing::debug!("Location provider enabled");
        self.indicator = SatIndicator::Unknown;
    }

    pub fn on_provider_disabled(&mut self) -> Option<GpsTransition> {
        tracing::debug!("Location provider disabled");
        self.go_inactive(SatIndicator::Off);
        Some(GpsTransition::Disabled)
    }

    pub fn on_status_changed(&mut self, status: ProviderStatus) -> Option<GpsTransition> {
        tracing::debug!("Location provider status changed to {:?}", status);
        match status {
            // Frequent; changing the indicator here makes it flicker.
            ProviderStatus::Available => None,
            ProviderStatus::OutOfService => {
                self.go_inactive(SatIndicator::Off);
                Some(GpsTransition::Disabled)
            }
            ProviderStatus::TemporarilyUnavailable => {
                self.go_inactive(SatIndicator::Unknown);
                None
            }
        }
    }

    fn go_inactive(&mut self, indicator: SatIndicator) {
        self.indicator = indicator;
        self.accuracy_label.clear();
        self.active = false;
    }
}
