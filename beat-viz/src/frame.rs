/// One display frame of analysis output, borrowed from the analyzer.
///
/// `frequency` holds one magnitude byte per frequency bin; `time_domain`
/// holds raw waveform bytes with 128 as the silence midpoint. Both are
/// refreshed by the host before every draw.
#[derive(Clone, Copy)]
pub struct AnalysisFrame<'a> {
    pub frequency: &'a [u8],
    pub time_domain: &'a [u8],
}

impl<'a> AnalysisFrame<'a> {
    pub fn new(frequency: &'a [u8], time_domain: &'a [u8]) -> Self {
        Self {
            frequency,
            time_domain,
        }
    }
}
