use clap::{Parser, Subcommand};
use hound::WavSpec;
use parawave_core::{parse_binary_message, Decoder, Encoder, ModemConfig, ToneScheme};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "parawave")]
#[command(about = "Parallel-tone FSK codec for embedding messages in audio")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a binary-digit message to a WAV audio file
    Encode {
        /// Message as binary digits, eight per byte (e.g. "01000001")
        #[arg(value_name = "BITS")]
        message: String,

        /// Symbol windows per second (one byte per window in multi-tone mode)
        #[arg(short, long, default_value = "1.0")]
        rate: f32,

        /// Output level in dBFS
        #[arg(short, long, default_value = "-3.0", allow_hyphen_values = true)]
        level: f32,

        /// Sample rate in kHz
        #[arg(short, long, default_value = "44.1")]
        sample_rate_khz: f32,

        /// Use the single-tone wire format (one bit per window)
        #[arg(long)]
        single_tone: bool,

        /// Output WAV file (default: tone_message_<secs>.wav)
        #[arg(short, long, value_name = "OUTPUT.WAV")]
        output: Option<PathBuf>,
    },

    /// Decode a WAV audio file back to its message
    Decode {
        /// Input WAV file
        #[arg(value_name = "INPUT.WAV")]
        input: PathBuf,

        /// Symbol windows per second the encoder used
        #[arg(short, long, default_value = "1.0")]
        rate: f32,

        /// Expect the single-tone wire format
        #[arg(long)]
        single_tone: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode {
            message,
            rate,
            level,
            sample_rate_khz,
            single_tone,
            output,
        } => encode_command(&message, rate, level, sample_rate_khz, single_tone, output)?,
        Commands::Decode {
            input,
            rate,
            single_tone,
        } => decode_command(&input, rate, single_tone)?,
    }

    Ok(())
}

fn build_config(sample_rate: f32, rate: f32, single_tone: bool) -> ModemConfig {
    let mut config = ModemConfig::for_rates(sample_rate, rate);
    if single_tone {
        config.scheme = ToneScheme::SingleTone;
    }
    config
}

fn encode_command(
    message: &str,
    rate: f32,
    level: f32,
    sample_rate_khz: f32,
    single_tone: bool,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = build_config(sample_rate_khz * 1000.0, rate, single_tone);
    config.level_dbfs = level;

    let encoder = Encoder::new(config)?;
    let bytes = parse_binary_message(message)?;
    let samples = encoder.encode(&bytes)?;
    println!("Encoded {} bytes to {} audio samples", bytes.len(), samples.len());

    let duration = encoder.duration_secs(bytes.len());
    let output = output.unwrap_or_else(|| {
        PathBuf::from(format!("tone_message_{}.wav", duration as u32))
    });

    let spec = WavSpec {
        channels: 1,
        sample_rate: encoder.config().sample_rate as u32,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let file = File::create(&output)?;
    let mut writer = hound::WavWriter::new(file, spec)?;
    for sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    println!("Wrote {:.1}s of audio to {}", duration, output.display());
    Ok(())
}

fn decode_command(
    input_path: &PathBuf,
    rate: f32,
    single_tone: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::open(input_path)
        .map_err(|e| format!("failed to open {}: {}", input_path.display(), e))?;
    let mut reader = hound::WavReader::new(file)?;

    let spec = reader.spec();
    println!(
        "Read WAV: {} Hz, {} channels, {} bits",
        spec.sample_rate, spec.channels, spec.bits_per_sample
    );

    // Extract samples (handle both 16-bit and 32-bit float formats)
    let samples: Vec<f32> = match spec.bits_per_sample {
        16 => {
            let int_samples: Result<Vec<i16>, _> = reader.samples::<i16>().collect();
            int_samples?
                .into_iter()
                .map(|s| s as f32 / 32768.0)
                .collect()
        }
        32 => {
            let float_samples: Result<Vec<f32>, _> = reader.samples::<f32>().collect();
            float_samples?
        }
        _ => {
            return Err(format!("Unsupported bit depth: {}", spec.bits_per_sample).into());
        }
    };
    println!("Extracted {} samples", samples.len());

    let config = build_config(spec.sample_rate as f32, rate, single_tone);
    let decoder = Decoder::new(config)?;
    let message = decoder.decode(&samples, spec.channels as usize)?;

    for byte in &message.bytes {
        match byte.printable() {
            Some(c) => println!("Byte {:08b} ({})", byte.value, c),
            None => println!("Byte {:08b} (non-printable)", byte.value),
        }
    }
    println!("Message: {}", message.to_text());
    Ok(())
}
