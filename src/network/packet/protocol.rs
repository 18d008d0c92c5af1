/// IPv4 プロトコル番号から名前を引く。未登録の番号は `None`。
pub fn protocol_name(protocol: u8) -> Option<&'static str> {
    match protocol {
        1 => Some("ICMP"),
        2 => Some("IGMP"),
        6 => Some("TCP"),
        9 => Some("IGRP"),
        17 => Some("UDP"),
        47 => Some("GRE"),
        50 => Some("ESP"),
        51 => Some("AH"),
        57 => Some("SKIP"),
        88 => Some("EIGRP"),
        89 => Some("OSPF"),
        115 => Some("L2TP"),
        _ => None,
    }
}
