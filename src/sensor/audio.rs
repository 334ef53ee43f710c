//! Microphone volume capture
//!
//! A cpal input stream whose data callback reduces each buffer to a
//! single scalar volume and overwrites a shared cell. The callback is
//! the cell's only writer; readers take a copy without blocking it.

use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tracing::warn;

use crate::core::{DeviceKind, Result, SenseError};

/// Volume = Frobenius norm of the buffer, scaled for downstream use
const VOLUME_SCALE: f32 = 10.0;

/// Microphone selection for one sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioDevice {
    /// No microphone; volume stays at 0.0
    Disabled,
    /// System default input device
    Default,
    /// Input device by enumeration index
    Index(usize),
}

/// Live microphone probe feeding a shared volume cell
///
/// Holding the probe keeps the stream alive; dropping it releases the
/// device.
pub struct VolumeProbe {
    volume: Arc<Mutex<f32>>,
    _stream: cpal::Stream,
}

impl VolumeProbe {
    /// Open the selected input device and start the callback stream
    pub fn open(device: AudioDevice) -> Result<Self> {
        let host = cpal::default_host();

        let input = match device {
            AudioDevice::Disabled => {
                return Err(SenseError::DeviceUnavailable {
                    device: DeviceKind::Microphone,
                    message: "audio capture disabled".to_string(),
                })
            }
            AudioDevice::Default => host.default_input_device(),
            AudioDevice::Index(index) => host
                .input_devices()
                .map_err(|e| SenseError::DeviceUnavailable {
                    device: DeviceKind::Microphone,
                    message: e.to_string(),
                })?
                .nth(index),
        }
        .ok_or_else(|| SenseError::DeviceUnavailable {
            device: DeviceKind::Microphone,
            message: format!("no input device for {:?}", device),
        })?;

        let config = input
            .default_input_config()
            .map_err(|e| SenseError::DeviceUnavailable {
                device: DeviceKind::Microphone,
                message: e.to_string(),
            })?;

        let volume = Arc::new(Mutex::new(0.0f32));
        let cell = Arc::clone(&volume);

        let stream = input
            .build_input_stream(
                &config.into(),
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    let norm = data.iter().map(|s| s * s).sum::<f32>().sqrt();
                    *cell.lock().unwrap() = norm * VOLUME_SCALE;
                },
                move |err| {
                    warn!("Audio input stream error: {}", err);
                },
                None,
            )
            .map_err(|e| SenseError::DeviceUnavailable {
                device: DeviceKind::Microphone,
                message: e.to_string(),
            })?;

        stream.play().map_err(|e| SenseError::DeviceUnavailable {
            device: DeviceKind::Microphone,
            message: e.to_string(),
        })?;

        Ok(Self {
            volume,
            _stream: stream,
        })
    }

    /// Latest volume value (non-blocking read of the shared cell)
    pub fn value(&self) -> f32 {
        *self.volume.lock().unwrap()
    }
}
