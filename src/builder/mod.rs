mod matrix;

pub use matrix::Matrix;

#[cfg(not(feature = "parallel"))]
use crate::common::mask::apply_best_mask;
#[cfg(feature = "parallel")]
use crate::common::mask::apply_best_mask_par as apply_best_mask;
use crate::common::{
    codec::encode_data,
    ec::compute_edc,
    error::QRResult,
    iter::module_sequence,
    mask::MaskPattern,
    metadata::{format_info, Color, Config, ECLevel, Version},
};

// Encoder
//------------------------------------------------------------------------------

/// Data codewords followed by their error correction codewords.
pub fn codewords(text: &str, config: &Config) -> QRResult<Vec<u8>> {
    let mut res = encode_data(text, config)?;
    let edc = compute_edc(&res, config.total_codewords())?;
    res.extend(edc);
    Ok(res)
}

/// Complete symbol for one mask: masked codewords, format info & fixed patterns.
pub fn assemble_candidate(
    config: &Config,
    seq: &[(i16, i16)],
    codewords: &[u8],
    mask: MaskPattern,
) -> Matrix {
    let mut m = Matrix::new(config.version());
    m.draw_codewords(seq, codewords, mask);
    m.draw_format_info(format_info(config.ec_level(), mask));
    m.place_fixed_patterns();
    m
}

/// Matrix holding only the masked codeword bits, laid along the module sequence.
pub fn masked_matrix(version: Version, codewords: &[u8], mask: MaskPattern) -> Matrix {
    let mut m = Matrix::new(version);
    m.draw_codewords(&module_sequence(version), codewords, mask);
    m
}

/// Encodes `text` & returns the lowest penalty symbol with the mask it used.
pub fn encode(text: &str, version: Version, ec_level: ECLevel) -> QRResult<(Matrix, MaskPattern)> {
    encode_with_config(text, &Config::new(version, ec_level)?)
}

pub fn encode_with_config(text: &str, config: &Config) -> QRResult<(Matrix, MaskPattern)> {
    let cw = codewords(text, config)?;
    Ok(apply_best_mask(config, &cw))
}


// QR
//------------------------------------------------------------------------------

/// Finished symbol along with the parameters it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QR {
    matrix: Matrix,
    config: Config,
    mask: MaskPattern,
    codewords: Vec<u8>,
}

impl QR {
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn into_matrix(self) -> Matrix {
        self.matrix
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn version(&self) -> Version {
        self.config.version()
    }

    pub fn ec_level(&self) -> ECLevel {
        self.config.ec_level()
    }

    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    pub fn codewords(&self) -> &[u8] {
        &self.codewords
    }

    pub fn width(&self) -> usize {
        self.matrix.width()
    }

    pub fn get(&self, r: i16, c: i16) -> Color {
        self.matrix.get(r, c)
    }

    pub fn metadata(&self) -> String {
        format!(
            "{{ Version: {:?}, Ec level: {:?}, Mask: {:?} }}",
            *self.version(),
            self.ec_level(),
            *self.mask
        )
    }
}

// QR builder
//------------------------------------------------------------------------------

pub struct QRBuilder<'a> {
    text: &'a str,
    version: Version,
    ec_level: ECLevel,
    mask: Option<MaskPattern>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, version: Version(2), ec_level: ECLevel::M, mask: None }
    }

    pub fn text(&mut self, text: &'a str) -> &mut Self {
        self.text = text;
        self
    }

    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = version;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn unset_mask(&mut self) -> &mut Self {
        self.mask = None;
        self
    }

    pub fn metadata(&self) -> String {
        match self.mask {
            Some(m) => format!(
                "{{ Version: {:?}, Ec level: {:?}, Mask: {:?} }}",
                *self.version, self.ec_level, *m
            ),
            None => format!(
                "{{ Version: {:?}, Ec level: {:?}, Mask: None }}",
                *self.version, self.ec_level
            ),
        }
    }
}


impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<QR> {
        println!("\nGenerating QR {}...", self.metadata());
        let config = Config::new(self.version, self.ec_level)?;

        println!("Encoding data & computing error correction...");
        let codewords = codewords(self.text, &config)?;

        let (matrix, mask) = match self.mask {
            Some(m) => {
                println!("Apply mask {:?}...", *m);
                let seq = module_sequence(self.version);
                (assemble_candidate(&config, &seq, &codewords, m), m)
            }
            None => {
                println!("Finding & applying best mask...");
                apply_best_mask(&config, &codewords)
            }
        };

        println!("\x1b[1;32mQR generated successfully!\n \x1b[0m");

        let qr = QR { matrix, config, mask, codewords };

        let total_modules = qr.width() * qr.width();
        let dark_modules = qr.matrix.count_dark_modules();
        let light_modules = total_modules - dark_modules;

        println!("Report:");
        println!("{}", qr.metadata());
        println!(
            "Data codewords: {}, Error correction codewords: {}",
            config.data_codewords(),
            config.ec_codewords()
        );
        println!(
            "Dark Cells: {}, Light Cells: {}, Balance: {}\n",
            dark_modules,
            light_modules,
            dark_modules * 100 / total_modules
        );

        Ok(qr)
    }
}
