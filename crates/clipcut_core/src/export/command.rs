//! ffmpeg argument construction for the two invocation shapes.
//!
//! Pure functions; nothing here touches the filesystem or spawns a
//! process, so command construction is testable in isolation.

use std::path::{Path, PathBuf};

use crate::models::{EncodingMode, Segment};

/// Encode parameters used in copy mode.
///
/// `-avoid_negative_ts make_zero` keeps stream-copied segments starting
/// at timestamp zero so the concat demuxer can join them.
pub const COPY_PARAMS: [&str; 4] = ["-c", "copy", "-avoid_negative_ts", "make_zero"];

/// Container extension forced when re-encoding.
pub const REENCODE_EXTENSION: &str = ".mp4";

/// Resolve the encode parameter tokens for a mode.
pub fn encode_params(mode: EncodingMode, reencode_tokens: &[String]) -> Vec<String> {
    match mode {
        EncodingMode::Copy => COPY_PARAMS.iter().map(|s| s.to_string()).collect(),
        EncodingMode::Reencode => reencode_tokens.to_vec(),
    }
}

/// Extension for temp artifacts and the output file, including the dot.
///
/// Re-encoding always produces mp4; copy mode keeps the source container.
pub fn artifact_extension(mode: EncodingMode, source: &Path) -> String {
    match mode {
        EncodingMode::Reencode => REENCODE_EXTENSION.to_string(),
        EncodingMode::Copy => source
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default(),
    }
}

/// Default output path: `<source-stem>_cut<ext>` next to the source.
pub fn default_output_path(source: &Path, mode: EncodingMode) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());
    source.with_file_name(format!("{}_cut{}", stem, artifact_extension(mode, source)))
}

/// Build the extraction invocation for one segment.
///
/// Seeks before the input (`-ss` ahead of `-i`) and bounds the read with
/// a duration directive rather than an absolute end time.
pub fn extract_args(
    source: &Path,
    segment: Segment,
    encode_params: &[String],
    dest: &Path,
) -> Vec<String> {
    let mut args = vec![
        "-y".to_string(),
        "-ss".to_string(),
        segment.start.to_string(),
        "-i".to_string(),
        source.display().to_string(),
        "-t".to_string(),
        segment.duration().to_string(),
    ];
    args.extend(encode_params.iter().cloned());
    args.push(dest.display().to_string());
    args
}

/// Build the concatenation invocation.
///
/// Always stream copy here, independent of the per-segment mode: the
/// segments are already in their final codec and re-encoding again
/// would be redundant. `-safe 0` permits absolute paths in the list.
pub fn concat_args(list_file: &Path, output: &Path) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-f".to_string(),
        "concat".to_string(),
        "-safe".to_string(),
        "0".to_string(),
        "-i".to_string(),
        list_file.display().to_string(),
        "-c".to_string(),
        "copy".to_string(),
        output.display().to_string(),
    ]
}
