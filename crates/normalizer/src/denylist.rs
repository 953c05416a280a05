//! 거부 목록 -- 정규 저장소로 취급하지 않을 소스 위치
//!
//! 권고문 수집용 저장소, 비정규 미러, PoC 저장소 등은 참조 URL에 자주
//! 등장하지만 영향받는 소프트웨어의 소스가 아닙니다.
//! 두 테이블 모두 프로세스 전역 정적 데이터이며 런타임에 변경되지 않습니다.

use std::sync::LazyLock;

use regex::Regex;

/// 권고문 수집 경로 형태를 잡는 정규식 원문
///
/// 경로가 `CVE`/`CVEs`, `CVE-YYYY-NNNN...` 세그먼트로 끝나거나
/// `GitHubAssessments/` 아래를 가리키면 매칭됩니다 (대소문자 무시).
/// 연도와 번호는 ASCII 숫자만 받습니다.
pub const DENYLIST_PATTERN: &str = r"(?i)/(?:(?:CVEs?)|(?:CVE-[0-9]{4}-[0-9]{4,})|GitHubAssessments/.*)$";

/// 컴파일된 거부 정규식
pub(crate) static DENYLIST_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(DENYLIST_PATTERN).expect("denylist pattern is a valid regex")
});

/// 거부 대상 저장소 URL 접두사
pub const DENYLISTED_REPOS: &[&str] = &[
    "https://github.com/abhiunix/goo-blog-App-CVE",
    "https://github.com/Accenture/AARO-Bugs",
    "https://github.com/active-labs/Advisories",
    "https://github.com/afeng2016-s/CVE-Request",
    "https://github.com/agadient/SERVEEZ-CVE",
    "https://github.com/AlwaysHereFight/YZMCMSxss",
    "https://github.com/alwentiu/COVIDSafe-CVE-2020-12856",
    "https://github.com/ArianeBlow/Axelor_Stored_XSS",
    "https://github.com/beicheng-maker/vulns",
    "https://github.com/BigTiger2020/74CMS",
    "https://github.com/BlackFan/client-side-prototype-pollution",
    "https://github.com/blindkey/cve_like",
    "https://github.com/ciph0x01/Simple-Exam-Reviewer-Management-System-CVE",
    "https://github.com/cloudflare/advisories",
    "https://github.com/CVEProject/cvelist",
    "https://github.com/cve-vul/vul",
    "https://github.com/daaaalllii/cve-s",
    "https://github.com/DayiliWaseem/CVE-2022-39196-",
    "https://github.com/eddietcc/CVEnotes",
    "https://github.com/enesozeser/Vulnerabilities",
    "https://github.com/Fadavvi/CVE-2018-17431-PoC",
    "https://github.com/FCncdn/Appsmith-Js-Injection-POC",
    "https://github.com/fireeye/Vulnerability-Disclosures",
    "https://github.com/GitHubAssessments/CVE_Assessments_11_2019",
    "https://github.com/github/cvelist",
    "https://github.com/gitlabhq/gitlabhq",
    "https://github.com/google/oss-fuzz-vulns",
    "https://github.com/Gr4y21/My-CVE-IDs",
    "https://github.com/hashicorp/terraform-enterprise-release-notes",
    "https://github.com/hemantsolo/CVE-Reference",
    "https://github.com/huclilu/CVE_Add",
    "https://github.com/i3umi3iei3ii/CentOS-Control-Web-Panel-CVE",
    "https://github.com/ianxtianxt/gitbook-xss",
    "https://github.com/itodaro/doorGets_cve",
    "https://github.com/jvz/test-cvelist",
    "https://github.com/Kenun99/CVE-batdappboomx",
    "https://github.com/kyrie403/Vuln",
    "https://github.com/lukaszstu/SmartAsset-CORS-CVE-2020-26527",
    "https://github.com/MacherCS/CVE_Evoh_Contract",
    "https://github.com/mandiant/Vulnerability-Disclosures",
    "https://github.com/martinkubecka/CVE-References",
    "https://github.com/mclab-hbrs/BBB-POC",
    "https://github.com/metaredteam/external-disclosures",
    "https://github.com/MrR3boot/CVE-Hunting",
    "https://github.com/N1ce759/74cmsSE-Arbitrary-File-Reading",
    "https://github.com/nepenthe0320/cve_poc",
    "https://github.com/Netflix/security-bulletins",
    "https://github.com/nextcloud/security-advisories",
    "https://github.com/nikip72/CVE-2021-39273-CVE-2021-39274",
    "https://github.com/nu11secur1ty/CVE-nu11secur1ty",
    "https://github.com/orangecertcc/security-research",
    "https://github.com/Orange-Cyberdefense/CVE-repository",
    "https://github.com/passtheticket/vulnerability-research",
    "https://github.com/post-cyberlabs/CVE-Advisory",
    "https://github.com/rapid7/metasploit-framework",
    "https://github.com/refi64/CVE-2020-25265-25266",
    "https://github.com/riteshgohil/My_CVE_References",
    "https://github.com/roughb8722/CVE-2021-3122-Details",
    "https://github.com/Ryan0lb/EC-cloud-e-commerce-system-CVE-application",
    "https://github.com/SaumyajeetDas/POC-of-CVE-2022-36271",
    "https://github.com/seb1055/cve-2020-27358-27359",
    "https://github.com/Security-AVS/-CVE-2021-26904",
    "https://github.com/seqred-s-a/gxdlmsdirector-cve",
    "https://github.com/sickcodes/security",
    "https://github.com/Snakinya/Vuln",
    "https://github.com/snyk/zip-slip-vulnerability",
    "https://github.com/soheilsamanabadi/vulnerability",
    "https://github.com/soheilsamanabadi/vulnerabilitys",
    "https://github.com/theyiyibest/Reflected-XSS-on-SockJS",
    "https://github.com/vQAQv/Request-CVE-ID-PoC",
    "https://github.com/vulnerabilities-cve/vulnerabilities",
    "https://github.com/wind-cyber/LJCMS-UserTraversal-Vulnerability",
    "https://github.com/wsummerhill/BSA-Radar_CVE-Vulnerabilities",
    "https://github.com/xiahao90/CVEproject",
    "https://github.com/xxhzz1/74cmsSE-Arbitrary-file-upload-vulnerability",
    "https://github.com/ycdxsb/Vuln",
    "https://github.com/YLoiK/74cmsSE-Arbitrary-file-upload-vulnerability",
    "https://github.com/z00z00z00/Safenet_SAC_CVE-2021-42056",
    "https://github.com/zer0yu/CVE_Request",
    "https://github.com/Zeyad-Azima/Issabel-stored-XSS",
    "https://gitlab.com/gitlab-org/gitlab-ce",
    "https://gitlab.com/gitlab-org/gitlab-ee",
    "https://gitlab.com/gitlab-org/gitlab-foss",
    "https://gitlab.com/gitlab-org/omnibus-gitlab",
    "https://gitlab.com/gitlab-org/release",
];

/// URL이 거부 정규식에 매칭되는지 확인합니다.
pub fn matches_pattern(url: &str) -> bool {
    DENYLIST_REGEX.is_match(url)
}

/// URL이 매칭되는 내장 거부 접두사를 반환합니다.
pub fn matching_prefix(url: &str) -> Option<&'static str> {
    DENYLISTED_REPOS
        .iter()
        .copied()
        .find(|prefix| url.starts_with(prefix))
}
