//! Stations known without loading the knowledgebase feed.

/// (CRS code, station name) for major stations, sorted by code.
pub(super) const BUILTIN_STATIONS: &[(&str, &str)] = &[
    ("ABD", "Aberdeen"),
    ("AFK", "Ashford International"),
    ("BFR", "London Blackfriars"),
    ("BHI", "Birmingham International"),
    ("BHM", "Birmingham New Street"),
    ("BMH", "Bournemouth"),
    ("BMO", "Birmingham Moor Street"),
    ("BPW", "Bristol Parkway"),
    ("BRI", "Bristol Temple Meads"),
    ("BSK", "Basingstoke"),
    ("BSW", "Birmingham Snow Hill"),
    ("BTH", "Bath Spa"),
    ("BTN", "Brighton"),
    ("CAR", "Carlisle"),
    ("CBG", "Cambridge"),
    ("CBW", "Canterbury West"),
    ("CDF", "Cardiff Central"),
    ("CHM", "Chelmsford"),
    ("CHX", "London Charing Cross"),
    ("CLJ", "Clapham Junction"),
    ("CNM", "Cheltenham Spa"),
    ("COV", "Coventry"),
    ("CRE", "Crewe"),
    ("CST", "London Cannon Street"),
    ("CTK", "City Thameslink"),
    ("DAR", "Darlington"),
    ("DBY", "Derby"),
    ("DHM", "Durham"),
    ("DID", "Didcot Parkway"),
    ("DON", "Doncaster"),
    ("ECR", "East Croydon"),
    ("EDB", "Edinburgh"),
    ("EUS", "London Euston"),
    ("EXD", "Exeter St Davids"),
    ("FST", "London Fenchurch Street"),
    ("GCR", "Gloucester"),
    ("GLC", "Glasgow Central"),
    ("GLD", "Guildford"),
    ("GLQ", "Glasgow Queen Street"),
    ("GTW", "Gatwick Airport"),
    ("HUL", "Hull"),
    ("HXX", "Heathrow Terminals 2 & 3"),
    ("INV", "Inverness"),
    ("IPS", "Ipswich"),
    ("KGX", "London Kings Cross"),
    ("LAN", "Lancaster"),
    ("LBG", "London Bridge"),
    ("LDS", "Leeds"),
    ("LEI", "Leicester"),
    ("LIV", "Liverpool Lime Street"),
    ("LST", "London Liverpool Street"),
    ("LTN", "Luton Airport Parkway"),
    ("LUT", "Luton"),
    ("MAN", "Manchester Piccadilly"),
    ("MCO", "Manchester Oxford Road"),
    ("MCV", "Manchester Victoria"),
    ("MKC", "Milton Keynes Central"),
    ("MYB", "London Marylebone"),
    ("NCL", "Newcastle"),
    ("NOT", "Nottingham"),
    ("NRW", "Norwich"),
    ("NWP", "Newport (South Wales)"),
    ("OXF", "Oxford"),
    ("PAD", "London Paddington"),
    ("PBO", "Peterborough"),
    ("PLY", "Plymouth"),
    ("PMS", "Portsmouth & Southsea"),
    ("PRE", "Preston"),
    ("RDG", "Reading"),
    ("SAC", "St Albans City"),
    ("SEV", "Sevenoaks"),
    ("SHF", "Sheffield"),
    ("SLO", "Slough"),
    ("SOT", "Stoke-on-Trent"),
    ("SOU", "Southampton Central"),
    ("SRA", "Stratford (London)"),
    ("SSD", "Stansted Airport"),
    ("STA", "Stafford"),
    ("STP", "London St Pancras International"),
    ("SWA", "Swansea"),
    ("SWI", "Swindon"),
    ("TON", "Tonbridge"),
    ("VIC", "London Victoria"),
    ("WAT", "London Waterloo"),
    ("WBQ", "Warrington Bank Quay"),
    ("WFJ", "Watford Junction"),
    ("WGN", "Wigan North Western"),
    ("WIN", "Winchester"),
    ("WOK", "Woking"),
    ("WVH", "Wolverhampton"),
    ("YRK", "York"),
    ("ZFD", "Farringdon"),
];
