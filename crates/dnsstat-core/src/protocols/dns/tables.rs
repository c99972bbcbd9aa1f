//! Static name tables for DNS numeric codes.
//!
//! Every lookup returns `None` for codes it does not know; callers keep the
//! numeric value alongside the label.

pub const fn opcode_name(code: u8) -> Option<&'static str> {
    match code {
        0 => Some("Query"),
        1 => Some("IQuery"),
        2 => Some("Status"),
        3 => Some("Unassigned"),
        4 => Some("Notify"),
        5 => Some("Update"),
        _ => None,
    }
}

/// Response code names, including the extended (EDNS/TSIG) codes above 15
/// which the 4-bit header field can never carry.
pub const fn rcode_name(code: u8) -> Option<&'static str> {
    match code {
        0 => Some("NoError"),
        1 => Some("FormErr"),
        2 => Some("ServFail"),
        3 => Some("NXDomain"),
        4 => Some("NotImp"),
        5 => Some("Refused"),
        6 => Some("YXDomain"),
        7 => Some("YXRRSet"),
        8 => Some("NXRRSet"),
        9 => Some("NotAuth"),
        10 => Some("NotZone"),
        16 => Some("BADVERS"),
        17 => Some("BADSIG"),
        18 => Some("BADTIME"),
        19 => Some("BADMODE"),
        20 => Some("BADNAME"),
        21 => Some("BADALG"),
        22 => Some("BADTRUNC"),
        23 => Some("BADCOOKIE"),
        _ => None,
    }
}

pub const fn qtype_name(code: u16) -> Option<&'static str> {
    match code {
        1 => Some("A"),
        2 => Some("NS"),
        5 => Some("CNAME"),
        6 => Some("SOA"),
        12 => Some("PTR"),
        15 => Some("MX"),
        16 => Some("TXT"),
        17 => Some("RP"),
        18 => Some("AFSDB"),
        24 => Some("SIG"),
        25 => Some("KEY"),
        28 => Some("AAAA"),
        29 => Some("LOC"),
        33 => Some("SRV"),
        35 => Some("NAPTR"),
        36 => Some("KX"),
        37 => Some("CERT"),
        39 => Some("DNAME"),
        42 => Some("APL"),
        43 => Some("DS"),
        44 => Some("SSHFP"),
        45 => Some("IPSECKEY"),
        46 => Some("RRSIG"),
        47 => Some("NSEC"),
        48 => Some("DNSKEY"),
        49 => Some("DHCID"),
        50 => Some("NSEC3"),
        51 => Some("NSEC3PARAM"),
        52 => Some("TLSA"),
        55 => Some("HIP"),
        59 => Some("CDS"),
        60 => Some("CDNSKEY"),
        61 => Some("OPENPGPKEY"),
        249 => Some("TKEY"),
        250 => Some("TSIG"),
        256 => Some("URI"),
        257 => Some("CAA"),
        32768 => Some("TA"),
        32769 => Some("DLV"),
        _ => None,
    }
}

pub const fn qclass_name(code: u16) -> Option<&'static str> {
    match code {
        0 => Some("Reserved"),
        1 => Some("Internet"),
        3 => Some("Chaos"),
        4 => Some("Hesiod"),
        254 => Some("QCLASS NONE"),
        255 => Some("QCLASS *(ANY)"),
        _ => None,
    }
}
