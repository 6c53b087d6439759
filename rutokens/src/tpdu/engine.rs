// rutokens/src/tpdu/engine.rs

use crate::constants::{
    DEFAULT_MAX_CONTINUATIONS, SW_LEN, SW1_BYTES_AVAILABLE, SW1_CORRECT_LE, SW1_WRONG_LENGTH,
};
use crate::protocol::apdu::{Case, IsoApdu, encode_short_len};
use crate::protocol::transcode::FormatTranscoder;
use crate::tpdu::header::TpduHeader;
use crate::transport::Transport;
use crate::types::{SlotStatus, StatusWord};
use crate::utils::bytes_to_hex_spaced;
use crate::{Error, Result};

/// Outcome of one command/response round on the wire.
#[derive(Debug)]
enum Step {
    /// Response data followed by the status word
    Done(Vec<u8>),
    /// The card asked for a follow-up command
    Continue {
        command: Vec<u8>,
        /// Keep only the status word of the final response
        discard_data: bool,
    },
}

/// Drives half-duplex T=0 exchanges over a `Transport`.
///
/// Le correction (6Cxx), GET RESPONSE chaining (61xx) and the automatic
/// GET RESPONSE after a successful Case 4S or SELECT FILE are follow-up
/// rounds of the same exchange; at most `max_continuations` of them run
/// before the exchange fails with `RetryLimitExceeded`.
pub struct TpduEngine<'t> {
    transport: &'t mut dyn Transport,
    transcoder: Option<FormatTranscoder>,
    max_continuations: usize,
}

impl<'t> TpduEngine<'t> {
    /// Engine over `transport` with the default continuation bound and no transcoding.
    pub fn new(transport: &'t mut dyn Transport) -> Self {
        Self {
            transport,
            transcoder: None,
            max_continuations: DEFAULT_MAX_CONTINUATIONS,
        }
    }

    /// Allow at most `limit` follow-up rounds per exchange.
    pub fn with_max_continuations(mut self, limit: usize) -> Self {
        self.max_continuations = limit;
        self
    }

    /// Rewrite payloads between ISO and proprietary layouts around each
    /// exchange.
    pub fn with_transcoder(mut self, transcoder: FormatTranscoder) -> Self {
        self.transcoder = Some(transcoder);
        self
    }

    /// Exchange one command APDU and return the response data followed by
    /// the status word.
    pub fn exchange(&mut self, apdu: &[u8]) -> Result<Vec<u8>> {
        // reject malformed input before anything is rewritten or sent
        IsoApdu::parse(apdu)?;
        let Some(transcoder) = self.transcoder else {
            return self.transceive(apdu);
        };

        let command = transcoder.outbound(apdu);
        let response = self.transceive(&command)?;
        Ok(transcoder.inbound(apdu, response))
    }

    /// Exchange without payload conversion.
    pub fn transceive(&mut self, apdu: &[u8]) -> Result<Vec<u8>> {
        let iso = IsoApdu::parse(apdu)?;
        log::debug!("exchange {:?}: {}", iso.case, bytes_to_hex_spaced(apdu));

        match iso.case {
            // Le was consumed by classification; the card sees a Case 3S
            // command and the automatic GET RESPONSE asks for that Le.
            Case::Case4S => {
                let command = &apdu[..apdu.len() - 1];
                self.run(command.to_vec(), true, encode_short_len(iso.le))
            }
            Case::Case2S | Case::Case3S => {
                self.run(apdu.to_vec(), iso.is_select_file(), encode_short_len(iso.le))
            }
            Case::Case1 => self.run(apdu.to_vec(), false, 0),
        }
    }

    fn run(&mut self, mut command: Vec<u8>, mut force: bool, get_response_le: u8) -> Result<Vec<u8>> {
        let mut continuations = 0usize;
        let mut discard = false;

        let mut response = loop {
            match self.round(&command, force, get_response_le)? {
                Step::Done(response) => break response,
                Step::Continue {
                    command: next,
                    discard_data,
                } => {
                    continuations += 1;
                    if continuations > self.max_continuations {
                        log::debug!("continuation limit {} hit", self.max_continuations);
                        return Err(Error::RetryLimitExceeded {
                            limit: self.max_continuations,
                        });
                    }
                    discard |= discard_data;
                    command = next;
                    force = false;
                }
            }
        };

        if discard {
            response.drain(..response.len().saturating_sub(SW_LEN));
        }
        log::debug!("response: {}", bytes_to_hex_spaced(&response));
        Ok(response)
    }

    fn round(&mut self, command: &[u8], force: bool, get_response_le: u8) -> Result<Step> {
        let apdu = IsoApdu::parse(command)?;
        let header = TpduHeader::for_command(&apdu);
        log::debug!("header: {}", bytes_to_hex_spaced(header.as_bytes()));
        self.transport.transmit(header.as_bytes())?;

        match apdu.case {
            Case::Case1 => {
                let sw = self.receive_status_word()?;
                Ok(Step::Done(sw.to_bytes().to_vec()))
            }
            Case::Case2S => self.data_from_card(command, &header),
            Case::Case3S | Case::Case4S => self.data_to_card(&apdu, force, get_response_le),
        }
    }

    fn data_from_card(&mut self, command: &[u8], header: &TpduHeader) -> Result<Step> {
        let mut data = Vec::new();
        if self.transport.status()? == SlotStatus::DataReady {
            data = self.transport.receive(header.expected_len())?;
            data.truncate(header.expected_len());
            log::debug!("data: {}", bytes_to_hex_spaced(&data));
        }

        let sw = self.receive_status_word()?;
        match sw.sw1 {
            SW1_WRONG_LENGTH => log::debug!("Le {:#04x} rejected ({})", header.p3(), sw),
            SW1_CORRECT_LE => {
                log::debug!("Le corrected to {:#04x}, re-issuing", sw.sw2);
                let mut retry = command.to_vec();
                retry[4] = sw.sw2;
                return Ok(Step::Continue {
                    command: retry,
                    discard_data: false,
                });
            }
            _ => {}
        }

        data.extend_from_slice(&sw.to_bytes());
        Ok(Step::Done(data))
    }

    fn data_to_card(&mut self, apdu: &IsoApdu<'_>, force: bool, get_response_le: u8) -> Result<Step> {
        match self.transport.status()? {
            SlotStatus::DataReady => {}
            SlotStatus::Mute => return Err(Error::DeviceMute),
            other => {
                return Err(Error::ProtocolViolation(format!(
                    "card refused data phase (slot {:?})",
                    other
                )));
            }
        }
        log::debug!("data: {}", bytes_to_hex_spaced(apdu.data));
        self.transport.transmit(apdu.data)?;

        let sw = self.receive_status_word()?;
        if sw.sw1 == SW1_BYTES_AVAILABLE {
            log::debug!("{} bytes available (forced: {})", sw.sw2, force);
            return Ok(Step::Continue {
                command: TpduHeader::get_response(sw.sw2).as_bytes().to_vec(),
                discard_data: !force,
            });
        }
        if sw.is_success() && force {
            log::debug!("automatic GET RESPONSE, Le {:#04x}", get_response_le);
            return Ok(Step::Continue {
                command: TpduHeader::get_response(get_response_le).as_bytes().to_vec(),
                discard_data: false,
            });
        }
        Ok(Step::Done(sw.to_bytes().to_vec()))
    }

    fn receive_status_word(&mut self) -> Result<StatusWord> {
        match self.transport.status()? {
            SlotStatus::StatusReady => {}
            SlotStatus::Mute => {
                log::debug!("slot mute while waiting for status word");
                return Err(Error::DeviceMute);
            }
            other => {
                return Err(Error::ProtocolViolation(format!(
                    "expected status word, slot {:?}",
                    other
                )));
            }
        }

        let raw = self.transport.receive(SW_LEN)?;
        let sw = StatusWord::try_from(raw.as_slice()).map_err(|_| {
            Error::ProtocolViolation(format!("short status word: {}", bytes_to_hex_spaced(&raw)))
        })?;
        log::debug!("sw: {}", sw);
        Ok(sw)
    }
}
