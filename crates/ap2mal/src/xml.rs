//! MyAnimeList import document serialization.
//!
//! The importer expects a `myanimelist` root holding one `myinfo` block
//! followed by one `anime` element per record, with every value serialized
//! as element text. Output is written as a single line; the importer does
//! not care about whitespace.

use anyhow::{Context, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::writer::Writer;
use shared::models::AnimeRecord;
use std::io::Write;

/// Export type expected by the importer for anime lists
const USER_EXPORT_TYPE: &str = "1";

/// Render a complete import document for the given records
pub fn render_document(user_name: &str, records: &[AnimeRecord]) -> Result<String> {
    let mut writer = Writer::new(Vec::new());

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .context("Failed to write XML declaration")?;

    writer
        .write_event(Event::Start(BytesStart::new("myanimelist")))
        .context("Failed to open root element")?;

    write_myinfo(&mut writer, user_name)?;

    for record in records {
        write_record(&mut writer, record)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("myanimelist")))
        .context("Failed to close root element")?;

    let bytes = writer.into_inner();
    String::from_utf8(bytes).context("Rendered XML is not valid UTF-8")
}

/// Write the `myinfo` header block
fn write_myinfo<W: Write>(writer: &mut Writer<W>, user_name: &str) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new("myinfo")))
        .context("Failed to open myinfo element")?;

    write_text_element(writer, "user_name", user_name)?;
    write_text_element(writer, "user_export_type", USER_EXPORT_TYPE)?;

    writer
        .write_event(Event::End(BytesEnd::new("myinfo")))
        .context("Failed to close myinfo element")?;

    Ok(())
}

/// Write one `anime` element with the ten export fields in schema order
fn write_record<W: Write>(writer: &mut Writer<W>, record: &AnimeRecord) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new("anime")))
        .context("Failed to open anime element")?;

    write_text_element(
        writer,
        "series_animedb_id",
        &record.series_animedb_id.to_string(),
    )?;
    write_text_element(writer, "my_id", &record.my_id.to_string())?;
    write_text_element(
        writer,
        "my_watched_episodes",
        &record.my_watched_episodes.to_string(),
    )?;
    write_text_element(writer, "my_start_date", &record.my_start_date)?;
    write_text_element(writer, "my_finish_date", &record.my_finish_date)?;
    write_text_element(writer, "my_score", &record.my_score.to_string())?;
    write_text_element(writer, "my_status", &record.my_status.code().to_string())?;
    write_text_element(
        writer,
        "my_times_watched",
        &record.my_times_watched.to_string(),
    )?;
    write_text_element(
        writer,
        "my_rewatch_value",
        &record.my_rewatch_value.to_string(),
    )?;
    write_text_element(
        writer,
        "update_on_import",
        &record.update_on_import.to_string(),
    )?;

    writer
        .write_event(Event::End(BytesEnd::new("anime")))
        .context("Failed to close anime element")?;

    Ok(())
}

/// Write a `<tag>text</tag>` element, escaping the text content
fn write_text_element<W: Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new(tag)))
        .with_context(|| format!("Failed to open {} element", tag))?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .with_context(|| format!("Failed to write {} text", tag))?;
    writer
        .write_event(Event::End(BytesEnd::new(tag)))
        .with_context(|| format!("Failed to close {} element", tag))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::WatchStatus;

    #[test]
    fn test_empty_document() {
        let xml = render_document("tester", &[]).unwrap();
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\
             <myanimelist><myinfo><user_name>tester</user_name>\
             <user_export_type>1</user_export_type></myinfo></myanimelist>"
        );
    }

    #[test]
    fn test_single_record_document() {
        let record = AnimeRecord::new(20, 220, 8, WatchStatus::Watching);
        let xml = render_document("tester", &[record]).unwrap();
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\
             <myanimelist><myinfo><user_name>tester</user_name>\
             <user_export_type>1</user_export_type></myinfo>\
             <anime><series_animedb_id>20</series_animedb_id><my_id>0</my_id>\
             <my_watched_episodes>220</my_watched_episodes>\
             <my_start_date>0000-00-00</my_start_date>\
             <my_finish_date>0000-00-00</my_finish_date>\
             <my_score>8</my_score><my_status>1</my_status>\
             <my_times_watched>0</my_times_watched>\
             <my_rewatch_value>0</my_rewatch_value>\
             <update_on_import>1</update_on_import></anime></myanimelist>"
        );
    }

    #[test]
    fn test_text_content_is_escaped() {
        let xml = render_document("R&D <test>", &[]).unwrap();
        assert!(xml.contains("<user_name>R&amp;D &lt;test&gt;</user_name>"));
    }
}
