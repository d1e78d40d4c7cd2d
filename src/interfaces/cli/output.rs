use crate::application::workflow::CheckoutReceipt;
use crate::domain::reader::Reader;
use std::io::{self, Write};

const HEADER: [&str; 5] = ["id", "label", "type", "status", "ip_address"];

/// Writes readers as a tab-separated table, one reader per line.
pub struct ReaderTable<W: Write> {
    writer: W,
}

impl<W: Write> ReaderTable<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_readers(&mut self, readers: &[Reader]) -> io::Result<()> {
        writeln!(self.writer, "{}", HEADER.join("\t"))?;
        for reader in readers {
            writeln!(
                self.writer,
                "{}\t{}\t{}\t{}\t{}",
                reader.id,
                reader.label.as_deref().unwrap_or("-"),
                if reader.device_type.is_empty() {
                    "-"
                } else {
                    reader.device_type.as_str()
                },
                reader.status.as_deref().unwrap_or("unknown"),
                reader.ip_address.as_deref().unwrap_or("-"),
            )?;
        }
        self.writer.flush()
    }
}

pub fn write_receipt(mut writer: impl Write, receipt: &CheckoutReceipt) -> io::Result<()> {
    writeln!(
        writer,
        "captured {} {} on reader {} (payment intent {})",
        receipt.amount,
        receipt.currency.as_str().to_uppercase(),
        receipt.reader.id,
        receipt.payment_intent_id
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_table() {
        let readers: Vec<Reader> = serde_json::from_str(
            r#"[{"id":"tmr_1","label":"Front","device_type":"verifone_P400","status":"online","ip_address":"10.0.0.2"},
                {"id":"tmr_2"}]"#,
        )
        .unwrap();

        let mut out = Vec::new();
        ReaderTable::new(&mut out).write_readers(&readers).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "id\tlabel\ttype\tstatus\tip_address");
        assert_eq!(lines[1], "tmr_1\tFront\tverifone_P400\tonline\t10.0.0.2");
        assert_eq!(lines[2], "tmr_2\t-\t-\tunknown\t-");
    }
}
