//! Interactive fallback for a missing `--productid`.

use std::io::{BufRead, Write};

/// Prompts with `Productid: ` until a non-empty line is entered.
///
/// # Errors
///
/// Returns an error on I/O failure or if input ends before a code is given.
pub(crate) fn prompt_product_id<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<String> {
    loop {
        write!(output, "Productid: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            anyhow::bail!("no product code entered");
        }

        let code = line.trim();
        if !code.is_empty() {
            return Ok(code.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn returns_trimmed_code() {
        let mut input = Cursor::new("  ABC123 \n");
        let mut output = Vec::new();
        let code = prompt_product_id(&mut input, &mut output).unwrap();
        assert_eq!(code, "ABC123");
        assert_eq!(String::from_utf8(output).unwrap(), "Productid: ");
    }

    #[test]
    fn reprompts_on_blank_line() {
        let mut input = Cursor::new("\n   \nXYZ\n");
        let mut output = Vec::new();
        let code = prompt_product_id(&mut input, &mut output).unwrap();
        assert_eq!(code, "XYZ");
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Productid: Productid: Productid: "
        );
    }

    #[test]
    fn end_of_input_is_an_error() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        assert!(prompt_product_id(&mut input, &mut output).is_err());
    }
}
