//! Simple inspector for encoded `Station` records.
//!
//! With a path argument the file is decoded and printed. Without one a
//! sample record is written to the temp directory first.
//!
//! Run with `RUST_LOG=trace` to see the decode steps.

use std::fs;

use serialkit::{
    serial_composite, serial_enumerable, serial_union, Codec, Composite, Endianness, SerialEnum,
    SerialHalf, SerialList, SerialS16, SerialString, SerialU32, SerialU8, Serializable, Union,
};

serial_enumerable! {
    pub enum Status { Offline, Online, Maintenance }
}

serial_union! {
    pub struct Reading(ReadingValue) {
        Temperature(temperature / set_temperature): SerialHalf,
        Level(level / set_level): SerialS16,
        Note(note / set_note): SerialString,
    }
}

serial_composite! {
    pub struct Station {
        id / set_id: SerialU32 = SerialU32::with_endianness(Endianness::Big),
        name / set_name: SerialString,
        status / set_status: SerialEnum<Status>,
        channels / set_channels: SerialList<SerialU8>,
        latest / set_latest: Reading,
    }
}

fn sample() -> Station {
    let mut station = Station::new();
    station.set_id(4711u32).expect("valid id");
    station.set_name("North Ridge").expect("valid name");
    station.set_status(Status::Online).expect("valid status");
    station
        .set_channels([1u8, 2, 5].map(serialkit::Value::from))
        .expect("valid channels");
    station.latest.set_temperature(21.5).expect("valid reading");
    station
}

fn print_station(station: &Station) {
    println!("\n=== Station ===");
    for descriptor in Station::schema().fields() {
        let codec = station.field(descriptor.name).expect("declared field");
        let access = if descriptor.settable { "rw" } else { "ro" };
        println!(
            "  {:<10} {:<26} [{}] {}",
            descriptor.name, descriptor.type_name, access, codec
        );
    }

    let latest = station.latest();
    println!("\n=== Latest Reading ===");
    println!("  variant: {} (#{})", latest.variant_name(), latest.variant_index());
    println!("  value:   {}", latest);
}

fn main() {
    env_logger::init();

    let path = match std::env::args().nth(1) {
        Some(path) => path,
        None => {
            let path = std::env::temp_dir().join("station.bin");
            let bytes = sample().to_bytes().expect("Failed to encode");
            fs::write(&path, &bytes).expect("Failed to write file");
            path.to_string_lossy().into_owned()
        }
    };

    println!("Reading: {}", path);

    let data = fs::read(&path).expect("Failed to read file");
    println!("File size: {} bytes", data.len());

    let (station, end) = Station::from_bytes(&data, 0).expect("Failed to decode");
    if end != data.len() {
        println!("Trailing bytes: {}", data.len() - end);
    }

    print_station(&station);
}
