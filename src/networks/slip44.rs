// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! SLIP-44 registered coin types.

// TODO: diff against satoshilabs/slips slip-0044.md and add the remaining rows.
/// `(unhardened index, symbol)`, sorted by index. Rows registered without a
/// ticker carry an empty symbol.
pub(super) const SLIP44_COIN_TYPES: &[(u32, &str)] = &[
    (0, "BTC"),
    (1, "TESTNET"),
    (2, "LTC"),
    (3, "DOGE"),
    (4, "RDD"),
    (5, "DASH"),
    (6, "PPC"),
    (7, "NMC"),
    (8, "FTC"),
    (9, "XCP"),
    (10, "BLK"),
    (11, "NSR"),
    (12, "NBT"),
    (13, "MZC"),
    (14, "VIA"),
    (15, "XCH"),
    (16, "RBY"),
    (17, "GRS"),
    (18, "DGC"),
    (19, "CCN"),
    (20, "DGB"),
    (21, ""),
    (22, "MONA"),
    (23, "CLAM"),
    (24, "XPM"),
    (25, "NEOS"),
    (26, "JBS"),
    (27, "ZRC"),
    (28, "VTC"),
    (29, "NXT"),
    (30, "BURST"),
    (31, "MUE"),
    (32, "ZOOM"),
    (33, "VASH"),
    (34, "CDN"),
    (35, "SDC"),
    (36, "PKB"),
    (37, "PND"),
    (38, "START"),
    (39, "MOIN"),
    (40, "EXP"),
    (41, "EMC2"),
    (42, "DCR"),
    (43, "XEM"),
    (44, "PART"),
    (45, "ARG"),
    (46, ""),
    (47, ""),
    (48, "SHR"),
    (49, "GCR"),
    (50, "NVC"),
    (51, "AC"),
    (52, "BTCD"),
    (53, "DOPE"),
    (54, "TPC"),
    (55, "AIB"),
    (56, "EDRC"),
    (57, "SYS"),
    (58, "SLR"),
    (59, "SMLY"),
    (60, "ETH"),
    (61, "ETC"),
    (62, "PSB"),
    (63, "LDCN"),
    (64, ""),
    (65, "XBC"),
    (66, "IOP"),
    (67, "NXS"),
    (68, "INSN"),
    (69, "OK"),
    (70, "BRIT"),
    (71, "CMP"),
    (72, "CRW"),
    (73, "BELA"),
    (74, "ICX"),
    (75, "FJC"),
    (76, "MIX"),
    (77, "XVG"),
    (78, "EFL"),
    (79, "CLUB"),
    (80, "RICHX"),
    (81, "POT"),
    (82, "QRK"),
    (83, "TRC"),
    (84, "GRC"),
    (85, "AUR"),
    (86, "IXC"),
    (87, "NLG"),
    (88, "BITB"),
    (89, "BTA"),
    (90, "XMY"),
    (91, "BSD"),
    (92, "UNO"),
    (93, "MTR"),
    (94, "GB"),
    (95, "SHM"),
    (96, "CRX"),
    (97, "BIQ"),
    (98, "EVO"),
    (99, "STO"),
    (100, "BIGUP"),
    (101, "GAME"),
    (102, "DLC"),
    (103, "ZYD"),
    (104, "DBIC"),
    (105, "STRAT"),
    (106, "SH"),
    (107, "MARS"),
    (108, "UBQ"),
    (109, "PTC"),
    (110, "NRO"),
    (111, "ARK"),
    (112, "USC"),
    (113, "THC"),
    (114, "LINX"),
    (115, "ECN"),
    (116, "DNR"),
    (117, "PINK"),
    (118, "ATOM"),
    (119, "PIVX"),
    (120, "FLASH"),
    (121, "ZEN"),
    (122, "PUT"),
    (123, "ZNY"),
    (124, "UNIFY"),
    (125, "XST"),
    (126, "BRK"),
    (127, "VC"),
    (128, "XMR"),
    (129, "VOX"),
    (130, "NAV"),
    (131, "FCT"),
    (132, "EC"),
    (133, "ZEC"),
    (134, "LSK"),
    (135, "STEEM"),
    (136, "XZC"),
    (137, "RBTC"),
    (138, ""),
    (139, "RPT"),
    (140, "LBC"),
    (141, "KMD"),
    (142, "BSQ"),
    (143, "RIC"),
    (144, "XRP"),
    (145, "BCH"),
    (146, "NEBL"),
    (147, "ZCL"),
    (148, "XLM"),
    (149, "NLC2"),
    (150, "WHL"),
    (151, "ERC"),
    (152, "DMD"),
    (153, "BTM"),
    (154, "BIO"),
    (155, "XWCC"),
    (156, "BTG"),
    (157, "BTC2X"),
    (158, "SSN"),
    (159, "TOA"),
    (160, "BTX"),
    (161, "ACC"),
    (162, "BCO"),
    (163, "ELLA"),
    (164, "PIRL"),
    (165, "XNO"),
    (166, "VIVO"),
    (167, "FRST"),
    (168, "HNC"),
    (169, "BUZZ"),
    (170, "MBRS"),
    (171, "HC"),
    (172, "HTML"),
    (173, "ODN"),
    (174, "ONX"),
    (175, "RVN"),
    (176, "GBX"),
    (177, "BTCZ"),
    (178, "POA"),
    (179, "NYC"),
    (180, "MXT"),
    (181, "WC"),
    (182, "MNX"),
    (183, "BTCP"),
    (184, "MUSIC"),
    (185, "BCA"),
    (186, "CRAVE"),
    (187, "STAK"),
    (188, "WBTC"),
    (189, "LCH"),
    (190, "EXCL"),
    (191, ""),
    (192, "LCC"),
    (193, "XFE"),
    (194, "EOS"),
    (195, "TRX"),
    (196, "KOBO"),
    (197, "HUSH"),
    (198, "BAN"),
    (199, "ETF"),
    (200, "OMNI"),
    (201, "BIFI"),
    (202, "UFO"),
    (203, "CNMC"),
    (204, "BCN"),
    (205, "RIN"),
    (206, "ATP"),
    (207, "EVT"),
    (208, "ATN"),
    (209, "BIS"),
    (210, "NEET"),
    (211, "BOPO"),
    (212, "OOT"),
    (213, "ALIAS"),
    (214, "MONK"),
    (215, "BOXY"),
    (216, "FLO"),
    (217, "MEC"),
    (218, "BTDX"),
    (219, "XAX"),
    (220, "ANON"),
    (221, "LTZ"),
    (222, "BITG"),
    (223, "ICP"),
    (224, "SMART"),
    (225, "XUEZ"),
    (226, "HLM"),
    (227, "WEB"),
    (228, "ACM"),
    (229, "NOS"),
    (230, "BITC"),
    (231, "HTH"),
    (232, "TZC"),
    (233, "VAR"),
    (234, "IOV"),
    (235, "FIO"),
    (236, "BSV"),
    (237, "DXN"),
    (238, "QRL"),
    (239, "PCX"),
    (240, "LOKI"),
    (241, ""),
    (242, "NIM"),
    (243, "SOPR"),
    (283, "ALGO"),
    (291, "IOST"),
    (304, "IOTX"),
    (309, "CKB"),
    (313, "ZIL"),
    (330, "LUNA"),
    (354, "DOT"),
    (360, "VSYS"),
    (394, "CRO"),
    (396, "EVER"),
    (397, "NEAR"),
    (425, "AION"),
    (429, "ERG"),
    (434, "KSM"),
    (457, "AE"),
    (459, "KAVA"),
    (461, "FIL"),
    (472, "AR"),
    (474, "ROSE"),
    (494, "BAND"),
    (500, "THETA"),
    (501, "SOL"),
    (506, "CSPR"),
    (508, "EGLD"),
    (529, "SCRT"),
    (535, "XHV"),
    (539, "FLOW"),
    (550, "XDC"),
    (566, "IRIS"),
    (589, "TFUEL"),
    (592, "GRIN"),
    (593, "MWC"),
    (607, "TON"),
    (626, "KDA"),
    (637, "APT"),
    (700, "XDAI"),
    (714, "BNB"),
    (750, "XPRT"),
    (784, "SUI"),
    (810, "ASTR"),
    (818, "VET"),
    (820, "CLO"),
    (888, "NEO"),
    (889, "TOMO"),
    (899, "XEC"),
    (904, "HNT"),
    (919, "CCD"),
    (931, "RUNE"),
    (966, "MATIC"),
    (990, "COREUM"),
    (996, "OKT"),
    (1001, "TT"),
    (1007, "FTM"),
    (1023, "ONE"),
    (1024, "ONT"),
    (1237, "NOSTR"),
    (1284, "GLMR"),
    (1285, "MOVR"),
    (1533, "BEAM"),
    (1729, "XTZ"),
    (1815, "ADA"),
    (1991, "SC"),
    (2017, "KIN"),
    (2018, "EOSC"),
    (2301, "QTUM"),
    (2305, "ELA"),
    (2718, "NAS"),
    (3030, "HBAR"),
    (3054, "HIVE"),
    (4218, "IOTA"),
    (4219, "SMR"),
    (4242, "AXE"),
    (5353, "HNS"),
    (5757, "STX"),
    (6060, "GO"),
    (8217, "KLAY"),
    (8964, "NULS"),
    (9000, "AVAX"),
    (9797, "NRG"),
    (12586, "MINA"),
    (16754, "ARDR"),
    (19167, "FLUX"),
    (52752, "CELO"),
    (99999, "WICC"),
    (105105, "STRAX"),
    (111111, "KAS"),
    (1313114, "ETHO"),
    (5249354, "BHD"),
    (5655640, "VLX"),
    (5718350, "WAN"),
    (5741564, "WAVES"),
];
